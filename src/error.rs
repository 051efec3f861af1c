//! Activity error taxonomy.

use thiserror::Error;

/// Failure from a validate-then-publish activity.
///
/// Validation failures carry the field-level message and render with the
/// `Validation failed:` prefix the consuming platform matches on; transport
/// failures wrap whatever the broker path reported. Both are rendered as a
/// `{"status": "error"}` document at the CLI boundary, so nothing here
/// escapes as a panic or a bare exit.
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl ActivityError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type ActivityResult<T> = Result<T, ActivityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_carries_prefix() {
        let err = ActivityError::validation("tenant_id is required");
        assert_eq!(err.to_string(), "Validation failed: tenant_id is required");
    }

    #[test]
    fn test_transport_display_is_transparent() {
        let err = ActivityError::from(anyhow::anyhow!("failed to connect to broker"));
        assert_eq!(err.to_string(), "failed to connect to broker");
    }
}
