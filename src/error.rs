use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed")]
    Terminal(#[from] std::io::Error),

    #[error("failed to load configuration")]
    ConfigLoad(#[source] confy::ConfyError),

    #[error("failed to save configuration")]
    ConfigStore(#[source] confy::ConfyError),

    #[error("failed to open log file {path}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write laps to {path}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
