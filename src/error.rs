use thiserror::Error;

pub type Result<T> = std::result::Result<T, OrderError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Layout classification needs at least one file to look at.
    #[error("cannot classify page layout: no input files")]
    EmptyInput,
}
