use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    #[error("animation target `{0}` is not mounted")]
    MissingTarget(&'static str),
    #[error("no window available")]
    NoWindow,
    #[error("no document available")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
}

pub type MotionResult<T> = Result<T, MotionError>;
