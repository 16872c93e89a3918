use std::collections::BTreeMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::errors::Error;

/// An error response of the form `{field: detail}`, for reporting a problem
/// with one field of a request to the client.
///
/// This type satisfies the requirements of `AppTypes::Error`, so simple
/// applications can use it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    status_code: StatusCode,
    detail: BTreeMap<String, String>,
}

impl ValidationError {
    pub const DEFAULT_DETAIL: &'static str = "A server error occurred.";

    /// Creates an error with the given detail message for `field`. If there
    /// is no detail, the payload is `{"detail": DEFAULT_DETAIL}` instead and
    /// `field` is not used. The status code defaults to 500.
    pub fn new(detail: Option<&str>, field: &str, status_code: Option<StatusCode>) -> Self {
        let status_code = status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let (field, detail) = match detail {
            Some(detail) => (field, detail),
            None => ("detail", Self::DEFAULT_DETAIL),
        };

        Self {
            status_code,
            detail: BTreeMap::from([(field.to_string(), detail.to_string())]),
        }
    }

    pub fn detail(&self) -> &BTreeMap<String, String> {
        &self.detail
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, detail)) in self.detail.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {detail}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl ResponseError for ValidationError {
    fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code)
            .json(&self.detail)
    }
}

impl From<Error> for ValidationError {
    fn from(error: Error) -> Self {
        let status_code = Some(error.status_code());

        match error {
            Error::InvalidUid => {
                Self::new(Some("Invalid activation or reset link."), "uid", status_code)
            },
            Error::InvalidToken => {
                Self::new(Some("Invalid or already used link."), "token", status_code)
            },
            Error::LinkExpired => {
                Self::new(Some("This link has expired."), "token", status_code)
            },
            Error::PasswordTooWeak => Self::new(
                Some("Password must be at least 8 characters long, and contain an uppercase letter, a lowercase letter, a digit and a special character."),
                "password",
                status_code,
            ),
            Error::MissingSecretKey | Error::Hasher(_) => {
                // Don't leak internal details to the client.
                log::error!("Internal error: {error}");
                Self::new(None, "detail", status_code)
            },
        }
    }
}
