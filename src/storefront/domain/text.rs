//! Text normalisation shared by the draft types.

use super::StorefrontDomainError;

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, StorefrontDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StorefrontDomainError::BlankField(field));
    }
    Ok(trimmed.to_owned())
}

/// Trims `value`, mapping blank strings to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Trims an optional email and checks it has a local part and a domain.
pub(crate) fn optional_email(
    value: Option<String>,
) -> Result<Option<String>, StorefrontDomainError> {
    let Some(email) = optional(value) else {
        return Ok(None);
    };
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        });
    if !valid {
        return Err(StorefrontDomainError::InvalidEmail(email));
    }
    Ok(Some(email))
}
