use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret string: a signing key, a password, a link token, or a password
/// hash. Convert a `String` with `Secret::from`, and read it back with
/// `secret.expose()` only where the raw value is really needed (e.g. when
/// putting a token into an email).
///
/// Secrets are redacted in `std::fmt::Debug` displays, and are zeroed-out in
/// memory when dropped.
#[derive(Clone)]
#[cfg_attr(feature = "diesel", derive(diesel_derive_newtype::DieselNewType))]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
pub struct Secret(pub(crate) String);

/// The stored password hash of a user, or nothing if the user has not chosen
/// a password yet (e.g. a freshly registered account awaiting activation).
///
/// The hash takes part in reset token derivation, so a reset link stops
/// working as soon as the password has been changed.
#[derive(Clone)]
#[cfg_attr(feature = "diesel", derive(diesel_derive_newtype::DieselNewType))]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
pub struct PasswordHash(pub(crate) Option<Secret>);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for Secret {}

impl PasswordHash {
    pub const NONE: Self = Self(None);

    pub fn exists(&self) -> bool {
        self.0.is_some()
    }

    /// The encoded hash, for storing in the database.
    pub fn expose(&self) -> Option<&str> {
        self.0.as_ref()
            .map(Secret::expose)
    }
}

impl From<String> for Secret {
    fn from(string: String) -> Self {
        Self(string)
    }
}

impl From<&str> for Secret {
    fn from(string: &str) -> Self {
        Self(string.to_string())
    }
}

impl From<String> for PasswordHash {
    fn from(string: String) -> Self {
        Self(Some(Secret(string)))
    }
}

impl From<Option<String>> for PasswordHash {
    fn from(string: Option<String>) -> Self {
        Self(string.map(Secret))
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[SECRET]")
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.exists() { "[SECRET]" } else { "[BLANK]" })
    }
}

impl<'de> serde::Deserialize<'de> for Secret {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)
            .map(Self::from)
    }
}

impl<'de> serde::Deserialize<'de> for PasswordHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<Secret>::deserialize(deserializer)
            .map(Self)
    }
}

/// Generates a new random key, suitable for `AppConfig::secret_key`. The key
/// is URL-safe base64 so it can be pasted into a config file.
pub fn generate_secret_key() -> Secret {
    crate::hashing::generate_base64_token::<{ crate::hashing::SECRET_KEY_BYTES }>()
}

#[cfg(test)]
mod test {
    use super::{generate_secret_key, PasswordHash, Secret};

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::from("hunter2");
        assert_eq!("[SECRET]", format!("{secret:?}"));
        assert_eq!("[BLANK]", format!("{:?}", PasswordHash::NONE));
        assert_eq!("[SECRET]", format!("{:?}", PasswordHash::from("$argon2id$...".to_string())));
    }

    #[test]
    fn test_deserialize() {
        let secret: Secret = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!("abc", secret.expose());

        let hash: PasswordHash = serde_json::from_str("null").unwrap();
        assert!(!hash.exists());
    }

    #[test]
    fn test_generated_keys_are_distinct() {
        let a = generate_secret_key();
        let b = generate_secret_key();
        assert!(!a.is_empty());
        assert_ne!(a.expose(), b.expose());
    }
}
