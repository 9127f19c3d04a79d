pub type BenchResult<T> = Result<T, BenchError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    #[error("frame reported while no scene is active")]
    NoActiveScene,

    #[error("benchmark has not been started")]
    NotStarted,

    #[error("benchmark was already started")]
    AlreadyStarted,

    #[error("benchmark already finished")]
    Finished,

    #[error("benchmark has not finished yet")]
    NotFinished,

    #[error("scene registry is empty")]
    EmptyRegistry,

    #[error("scene '{0}' has weight 0")]
    ZeroWeight(String),

    #[error("invalid display: {0}")]
    InvalidDisplay(String),
}

impl BenchError {
    pub fn invalid_display(msg: impl Into<String>) -> Self {
        Self::InvalidDisplay(msg.into())
    }
}
