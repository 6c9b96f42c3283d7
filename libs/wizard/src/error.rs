use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("IO error: {0}")]
    Io(#[from] IoError),
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported configuration version {found} (expected {expected})")]
    UnsupportedConfigVersion { found: u32, expected: u32 },
    #[error("Failed to determine config directory (XDG_CONFIG_HOME or ~/.config)")]
    NoConfigDir,
    #[error("Page is busy handling another event")]
    PageBusy,
}

pub type WizardResult<T> = Result<T, WizardError>;
