use crate::{
    app::{AppConfig, AppTypes},
    errors::Error,
    hashing,
    secret::Secret,
    users::AccountUser,
};

/// What a token authorizes. The purpose is part of the token derivation, so
/// an activation token cannot be used to reset a password, or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    Activation,
    PasswordReset,
}

impl TokenPurpose {
    fn tag(self) -> &'static [u8] {
        match self {
            Self::Activation => b"authlinks/activation",
            Self::PasswordReset => b"authlinks/password-reset",
        }
    }
}

/// Generates an opaque token for the given user and purpose. Nothing is
/// stored; the token is a random nonce plus a keyed digest of the nonce and
/// the user's current state, so it stops being valid as soon as the user's
/// email, active flag, password hash or `AccountUser::token_fingerprint`
/// changes. Each call returns a different token.
///
/// Fails only if the configured secret key is empty.
pub fn generate_token<A: AppConfig + AppTypes>(
    app: &A,
    user: &A::User,
    purpose: TokenPurpose,
) -> Result<Secret, Error> {
    let nonce = hashing::generate_base64_token::<TOKEN_NONCE_BYTES>();
    let digest = token_digest(app, user, purpose, nonce.expose())?;

    Ok(Secret(format!("{}.{}", nonce.expose(), digest.expose())))
}

/// Checks a token against the user's current state. Returns `false` if the
/// token is wrong, malformed, issued for another purpose, or if no token can
/// be generated at all.
///
/// This does not check the link expiry times stored on the user; see
/// `activate_account` and `reset_password` for flows which do.
pub fn is_token_valid<A: AppConfig + AppTypes>(
    app: &A,
    user: &A::User,
    purpose: TokenPurpose,
    token: &str,
) -> bool {
    let Some((nonce, digest)) = token.split_once('.') else {
        log::debug!("Malformed {purpose:?} token for user #{}", user.id());
        return false;
    };

    match token_digest(app, user, purpose, nonce) {
        Ok(expected) => hashing::check_digest(digest, &expected),
        Err(e) => {
            log::info!("Cannot check {purpose:?} token for user #{}: {e}", user.id());
            false
        }
    }
}

/// The number of random bytes in a token's nonce.
const TOKEN_NONCE_BYTES: usize = 9;

fn token_digest<A: AppConfig + AppTypes>(
    app: &A,
    user: &A::User,
    purpose: TokenPurpose,
    nonce: &str,
) -> Result<Secret, Error> {
    let user_id = Into::<i64>::into(user.id()).to_string();
    let is_active: &[u8] = if user.is_active() { b"1" } else { b"0" };
    let password_hash = user.password_hash()
        .expose()
        .unwrap_or("");
    let fingerprint = user.token_fingerprint();

    hashing::keyed_digest(app.secret_key(), &[
        purpose.tag(),
        nonce.as_bytes(),
        user_id.as_bytes(),
        user.email().as_bytes(),
        is_active,
        password_hash.as_bytes(),
        fingerprint.as_bytes(),
    ])
}

/// Encodes a user id for use in a link, as URL-safe base64 of its decimal
/// representation.
pub fn encode_uid<T: Into<i64>>(id: T) -> String {
    let id_i64 = Into::<i64>::into(id);
    hashing::base64_encode(id_i64.to_string().as_bytes())
}

/// Decodes a user id from a link. Returns `None` if the uid is not valid
/// base64, does not encode an integer, or is out of range for `T`.
pub fn decode_uid<T: TryFrom<i64>>(uid: &str) -> Option<T> {
    let bytes = hashing::base64_decode(uid)?;
    let id_str = std::str::from_utf8(&bytes).ok()?;
    let id = id_str.parse::<i64>().ok()?;
    T::try_from(id).ok()
}
