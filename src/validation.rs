//! Request validation utilities.

use crate::types::{Error, Result};

/// Reject empty or whitespace-only input with `message`.
pub fn validate_not_blank(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_rejected() {
        assert!(validate_not_blank("", "Tool name is required").is_err());
        assert!(validate_not_blank("  \t", "Tool name is required").is_err());

        let err = validate_not_blank(" ", "URI is required").unwrap_err();
        assert_eq!(err.message(), "URI is required");
    }

    #[test]
    fn test_non_blank_accepted() {
        assert!(validate_not_blank("echo", "Tool name is required").is_ok());
        assert!(validate_not_blank(" x ", "Tool name is required").is_ok());
    }
}
