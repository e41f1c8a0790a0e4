use core::time::Duration;

/// Time left to sleep before the next tick, given how long this tick took.
///
/// The loop is re-armed after each tick, so a slow tick shortens the next
/// sleep instead of pushing every later tick back. An overrun re-arms
/// immediately.
pub fn remaining(period: Duration, elapsed: Duration) -> Duration {
    period.saturating_sub(elapsed)
}
