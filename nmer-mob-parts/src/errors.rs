use thiserror::Error;

#[derive(Error, Debug)]
pub enum MobModelError {
    #[error("Model name cannot be empty")]
    EmptyName,
    #[error("Unknown model name: {0}")]
    UnknownName(String),
    #[error("No block has numeric identity {0}")]
    UnknownBlock(u32),
    #[error("Block preview rendering failed: {0}")]
    PreviewFailed(String),
}

pub type Result<T> = std::result::Result<T, MobModelError>;
