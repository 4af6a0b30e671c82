//! Errors that abort an audit run.

use crate::github::ApiError;
use crate::logger::LoggerError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A GitHub request failed in a way no check knows how to report.
    #[error("GitHub API error: {0}")]
    Api(#[from] ApiError),

    /// The result logger was misused or could not write its output.
    #[error("report error: {0}")]
    Logger(#[from] LoggerError),
}
