pub trait FeedbackController<T> {
    fn update(&mut self, error: T) -> T;
}

pub mod proportional;
