use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid channel: {0}")]
    InvalidChannel(usize),
    #[error("Empty message")]
    EmptyMessage,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ControllerError>;
