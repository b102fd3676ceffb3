use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    ChromeNotFound(String),

    #[error("Chrome binary not executable: {}", .0.display())]
    NotExecutable(PathBuf),

    #[error("Failed to launch Chrome: {0}")]
    Launch(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use chromiumoxide::error::CdpError;

    #[test]
    fn test_cdp_errors_keep_their_message() {
        let err = Error::from(CdpError::Timeout);
        assert!(matches!(err, Error::Cdp(_)));
        assert!(err.to_string().starts_with("CDP error: "));
    }

    #[test]
    fn test_not_executable_names_the_path() {
        let err = Error::NotExecutable(PathBuf::from("/opt/chrome/chrome"));
        assert_eq!(err.to_string(), "Chrome binary not executable: /opt/chrome/chrome");
    }
}
