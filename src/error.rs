use std::io;

use thiserror::Error;

// =============================================================================
// Catalog errors: the embedded configuration does not match the demo table
// =============================================================================

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse pattern catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Catalog lists '{id}' but no demo routine is registered for it")]
    MissingDemo { id: String },

    #[error("Demo routine '{id}' is not listed in the catalog")]
    UnlistedDemo { id: String },

    #[error("Pattern '{id}' appears more than once in the catalog")]
    Duplicate { id: String },

    #[error("Pattern id '{id}' must be non-empty lowercase ASCII letters and hyphens")]
    InvalidId { id: String },

    #[error("Pattern '{id}' breaks the creational -> structural -> behavioral grouping")]
    FamilyOrder { id: String },

    #[error("Invalid logging directive '{directive}': {reason}")]
    LogDirective { directive: String, reason: String },
}

// =============================================================================
// Harness errors: what the `demo` binary reports before exiting
// =============================================================================

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("unknown pattern '{id}' (run `demo list` to see the catalog)")]
    UnknownPattern { id: String },

    #[error("expected at most one argument, got {}: {}", args.len(), args.join(" "))]
    Usage { args: Vec<String> },

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl HarnessError {
    pub fn unknown_pattern(id: impl Into<String>) -> Self {
        Self::UnknownPattern { id: id.into() }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            HarnessError::UnknownPattern { .. } | HarnessError::Usage { .. } => 1,
            HarnessError::Io(_) | HarnessError::Catalog(_) => 2,
        }
    }
}

pub type Result<T, E = HarnessError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(HarnessError::unknown_pattern("nope").exit_code(), 1);
        assert_eq!(
            HarnessError::Usage {
                args: vec!["a".into(), "b".into()]
            }
            .exit_code(),
            1
        );
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(HarnessError::from(io_err).exit_code(), 2);
        let catalog = CatalogError::MissingDemo { id: "x".into() };
        assert_eq!(HarnessError::from(catalog).exit_code(), 2);
    }

    #[test]
    fn test_messages_are_single_line() {
        let errors = [
            HarnessError::unknown_pattern("unknown-id"),
            HarnessError::Usage {
                args: vec!["singleton".into(), "observer".into()],
            },
        ];
        for err in errors {
            let message = err.to_string();
            assert!(!message.contains('\n'), "multi-line message: {message}");
        }
    }

    #[test]
    fn test_unknown_pattern_names_the_id() {
        let message = HarnessError::unknown_pattern("unknown-id").to_string();
        assert!(message.contains("'unknown-id'"));
    }
}
