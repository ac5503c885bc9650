//! Log sanitization utilities for masking recipient addresses.
//!
//! Outreach and summary emails go to third parties; only a masked form of
//! their addresses reaches the logs.

/// Mask an email address for safe logging.
///
/// Shows only the first 3 characters (or fewer if the local part is shorter)
/// followed by asterisks and the domain.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_email("user@example.com"), "use***@example.com");
/// assert_eq!(mask_email("ab@test.org"), "ab***@test.org");
/// ```
pub fn mask_email(email: &str) -> String {
    let email = email.trim();
    let (local_part, domain) = match email.find('@') {
        Some(at_pos) => email.split_at(at_pos),
        None => (email, ""),
    };
    let visible: String = local_part.chars().take(3).collect();
    format!("{}***{}", visible, domain)
}

/// Mask every address of a recipient list.
pub fn mask_recipients(recipients: &[String]) -> Vec<String> {
    recipients.iter().map(|r| mask_email(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email_normal() {
        assert_eq!(mask_email("user@example.com"), "use***@example.com");
        assert_eq!(mask_email("johndoe@test.org"), "joh***@test.org");
    }

    #[test]
    fn test_mask_email_short_local_part() {
        assert_eq!(mask_email("ab@test.org"), "ab***@test.org");
        assert_eq!(mask_email("a@test.org"), "a***@test.org");
    }

    #[test]
    fn test_mask_email_invalid() {
        assert_eq!(mask_email("notanemail"), "not***");
    }

    #[test]
    fn test_mask_email_non_ascii() {
        assert_eq!(mask_email("éloïse@exemple.fr"), "élo***@exemple.fr");
    }

    #[test]
    fn test_mask_recipients() {
        let recipients = vec!["hr@acme.com".to_string(), "jobs@globex.com".to_string()];
        assert_eq!(
            mask_recipients(&recipients),
            vec!["hr***@acme.com", "job***@globex.com"]
        );
    }
}
