use actix_web::http::StatusCode;

#[derive(Debug)]
pub enum Error {
    /// Indicates that the `uid` part of an activation or reset link could not
    /// be decoded, or that it refers to a user who does not exist.
    InvalidUid,

    /// Indicates that the token in an activation or reset link does not match
    /// the user's current state. The link may already have been used, it may
    /// have been issued for a different purpose, or it never existed.
    InvalidToken,

    /// Indicates that the token is correct, but the link's expiry time stored
    /// on the user record has passed (or no link was ever issued).
    LinkExpired,

    /// Indicates that the user chose a password which does not satisfy
    /// `is_strong_password`.
    PasswordTooWeak,

    /// Configuration error; `AppConfig::secret_key` returned an empty key, so
    /// no token can be issued.
    MissingSecretKey,

    /// Internal error which occurs when hashing a new password.
    Hasher(password_hash::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUid
            | Self::InvalidToken
            | Self::LinkExpired
            | Self::PasswordTooWeak => StatusCode::BAD_REQUEST,

            Self::MissingSecretKey
            | Self::Hasher(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn as_app_err<T, E: From<Self>>(self) -> Result<T, E> {
        Err(E::from(self))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUid => f.write_str("invalid user identifier in link"),
            Self::InvalidToken => f.write_str("invalid or already used link token"),
            Self::LinkExpired => f.write_str("link has expired"),
            Self::PasswordTooWeak => f.write_str("password is too weak"),
            Self::MissingSecretKey => f.write_str("no secret key is configured"),
            Self::Hasher(e) => write!(f, "password hashing failed: {e}"),
        }
    }
}
