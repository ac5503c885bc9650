//! Task-related custom validators.

use validator::{ValidateEmail, ValidationError};

use crate::constants::{ERR_BLANK_TITLE, ERR_INVALID_RECIPIENT, ERR_INVALID_TASK_ID};

/// Custom validator for task recipient lists.
/// Every entry must be a syntactically valid email address.
pub fn validate_recipients(recipients: &[String]) -> Result<(), ValidationError> {
    if recipients.iter().all(|r| r.trim().validate_email()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_recipient");
        error.message = Some(ERR_INVALID_RECIPIENT.into());
        Err(error)
    }
}

/// Custom validator rejecting whitespace-only titles.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(ERR_BLANK_TITLE.into());
        return Err(error);
    }
    Ok(())
}

/// Whether a task ID can be used verbatim inside an upload filename.
pub fn is_valid_task_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 100
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Custom validator for client-supplied task IDs. Blank means "generate one".
pub fn validate_task_id(id: &str) -> Result<(), ValidationError> {
    let id = id.trim();
    if id.is_empty() || is_valid_task_id(id) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_task_id");
        error.message = Some(ERR_INVALID_TASK_ID.into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipients() {
        assert!(validate_recipients(&["hr@example.com".to_string()]).is_ok());
        assert!(validate_recipients(&[]).is_ok());
        assert!(validate_recipients(&["not-an-email".to_string()]).is_err());
    }

    #[test]
    fn test_task_ids() {
        assert!(is_valid_task_id("1718029384756"));
        assert!(is_valid_task_id("6f1c0a2e-9b7d-4a51-8f0e-3c2b1d4e5f60"));
        assert!(!is_valid_task_id("../etc"));
        assert!(!is_valid_task_id("a b"));
        assert!(validate_task_id("  ").is_ok());
    }

    #[test]
    fn test_blank_titles() {
        assert!(validate_not_blank("Apply").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
