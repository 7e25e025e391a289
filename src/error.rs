use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the survey pipeline to whichever front-end drives it.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The survey file is absent, unreadable or not tabular.
    #[error("failed to load survey data from {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// An expected column is not present in the survey file.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Age bounds supplied with `min > max`.
    #[error("invalid age range: min {min} is greater than max {max}")]
    InvalidRange { min: u32, max: u32 },

    /// The optional dashboard configuration file could not be used.
    #[error("invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl DashboardError {
    pub(crate) fn load(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::Load {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::MissingColumn {
            column: "Idade".into(),
            path: PathBuf::from("/data/survey.csv"),
        };
        assert_eq!(
            err.to_string(),
            "required column 'Idade' not found in /data/survey.csv"
        );
    }

    #[test]
    fn test_invalid_range_display() {
        let err = DashboardError::InvalidRange { min: 40, max: 30 };
        assert_eq!(
            err.to_string(),
            "invalid age range: min 40 is greater than max 30"
        );
    }
}
