//! Masking of personal data before it reaches the logs.

/// Mask an email address, keeping up to three leading characters and the domain.
///
/// ```ignore
/// assert_eq!(mask_email("publisher@devcamper.io"), "pub***@devcamper.io");
/// ```
pub fn mask_email(email: &str) -> String {
    let (local, domain) = match email.find('@') {
        Some(at) => email.split_at(at),
        None => (email, ""),
    };
    let visible: String = local.chars().take(3).collect();
    format!("{}***{}", visible, domain)
}
