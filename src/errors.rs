use std::io;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("End of input reached")]
    EndOfInput,

    #[error("Index {index} out of range for row with {len} fields")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl From<io::Error> for CsvError {
    fn from(error: io::Error) -> Self {
        CsvError::Io(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CsvError>;
