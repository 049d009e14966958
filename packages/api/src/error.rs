use store::{FieldErrors, FormFailure};
use thiserror::Error;

/// Everything a gateway call can fail with.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// The server rejected the body. Keys are field names.
    #[error("validation failed: {}", summarize(.0))]
    ValidationFailed(FieldErrors),
    #[error("not found: {0}")]
    NotFound(String),
    /// Network failure, unexpected status or an undecodable body.
    #[error("request failed: {0}")]
    RequestFailed(String),
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApiError {
    /// How the error shows up on a form.
    pub fn into_failure(self) -> FormFailure {
        match self {
            ApiError::ValidationFailed(errors) => FormFailure::Fields(errors),
            ApiError::NotFound(message) => FormFailure::Notice(message),
            ApiError::RequestFailed(message) => FormFailure::Notice(message),
        }
    }

    /// A single line for notices that cannot point at a field.
    pub fn message(&self) -> String {
        match self {
            ApiError::ValidationFailed(errors) => summarize(errors),
            ApiError::NotFound(message) | ApiError::RequestFailed(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_failure() {
        let mut errors = FieldErrors::new();
        errors.insert("brand".to_string(), "must not be blank".to_string());
        assert_eq!(
            ApiError::ValidationFailed(errors.clone()).into_failure(),
            FormFailure::Fields(errors)
        );
        assert_eq!(
            ApiError::NotFound("User not found".to_string()).into_failure(),
            FormFailure::Notice("User not found".to_string())
        );
    }

    #[test]
    fn test_message_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("brand".to_string(), "must not be blank".to_string());
        errors.insert("price".to_string(), "must be positive".to_string());
        let err = ApiError::ValidationFailed(errors);
        assert_eq!(err.message(), "brand: must not be blank, price: must be positive");
        assert_eq!(
            err.to_string(),
            "validation failed: brand: must not be blank, price: must be positive"
        );
    }
}
