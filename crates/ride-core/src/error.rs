use std::path::PathBuf;

use thiserror::Error;

/// Failures that prevent a dataset from being built at all.
///
/// Individual malformed cells never produce one of these; they are coerced
/// to documented defaults during normalization.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source unavailable: {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source has no header row: {}", path.display())]
    MissingHeader { path: PathBuf },

    #[error("failed to read CSV records")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_unavailable_message_names_the_path() {
        let err = LoadError::SourceUnavailable {
            path: PathBuf::from("data/missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };

        assert_eq!(err.to_string(), "source unavailable: data/missing.csv");
        assert!(std::error::Error::source(&err).is_some());
    }
}
