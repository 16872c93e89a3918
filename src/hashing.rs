use argon2::Argon2;
use hmac::{Hmac, Mac};
use password_hash::{PasswordHasher, SaltString};
use sha2::Sha256;

use crate::{
    errors::Error,
    secret::{PasswordHash, Secret},
};

type HmacSha256 = Hmac<Sha256>;

/// The number of random bytes in a key made by `generate_secret_key`. This is
/// the output size of HMAC-SHA256, rounded up to a multiple of three so the
/// base64 encoding has no filler characters.
pub const SECRET_KEY_BYTES: usize = 33;

/// Computes a password hash for the given password, which can be stored in the
/// database. A strong password hashing algorithm with a salt is used.
pub(crate) fn generate_password_hash(new_password: &Secret) -> Result<PasswordHash, Error> {
    let salt = SaltString::generate(rand::thread_rng());

    let hash = Argon2::default()
        .hash_password(new_password.as_bytes(), &salt)
        .map_err(Error::Hasher)?;

    Ok(PasswordHash(Some(Secret(hash.to_string()))))
}

/// Computes an HMAC-SHA256 tag over `parts` with the given key, encoded as
/// URL-safe base64.
///
/// Each part is prefixed with its length, so that moving bytes from one part
/// to the next (e.g. `"1" + "23"` vs `"12" + "3"`) changes the tag.
///
/// Returns `Error::MissingSecretKey` if the key is empty; HMAC would accept
/// one, but every deployment would then share the same "secret".
pub(crate) fn keyed_digest(key: &Secret, parts: &[&[u8]]) -> Result<Secret, Error> {
    if key.is_empty() {
        return Err(Error::MissingSecretKey);
    }

    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|_| Error::MissingSecretKey)?;
    for part in parts {
        mac.update(&(part.len() as u64).to_be_bytes());
        mac.update(part);
    }

    let tag = mac.finalize().into_bytes();
    Ok(Secret(base64_encode(&tag)))
}

/// Checks whether a given raw string matches an expected digest, in constant
/// time.
pub(crate) fn check_digest(given: &str, expected: &Secret) -> bool {
    constant_time_eq::constant_time_eq(given.as_bytes(), expected.as_bytes())
}

/// Generates a random token with `N` bytes of entropy, base64-encoded.
pub(crate) fn generate_base64_token<const N: usize>() -> Secret {
    use rand::{thread_rng, Rng};

    let mut bytes = [0u8; N];
    thread_rng().fill(&mut bytes as &mut [u8]);
    Secret(base64_encode(&bytes))
}

pub(crate) fn base64_encode(bytes: &[u8]) -> String {
    // Tokens and uids are placed in URL paths; padding would need escaping.
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    URL_SAFE_NO_PAD.encode(bytes)
}

pub(crate) fn base64_decode(encoded: &str) -> Option<Vec<u8>> {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    URL_SAFE_NO_PAD.decode(encoded).ok()
}
