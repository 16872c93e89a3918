use crate::{
    app::{App, AppTypes},
    errors::Error,
    hashing,
    password::check_password_strength,
    secret::{PasswordHash, Secret},
    tokens::{self, TokenPurpose},
};

/// The fields of a user record which this library reads and writes. The
/// record itself belongs to the application, and is saved with
/// `AppDb::persist_user`.
pub trait AccountUser<A: AppTypes> {
    /// Gets the user's id field.
    fn id(&self) -> A::ID;

    fn username(&self) -> &str;

    /// Gets the address which activation and reset links are sent to.
    fn email(&self) -> &str;

    fn is_active(&self) -> bool;

    fn set_active(&mut self, is_active: bool);

    fn password_hash(&self) -> &PasswordHash;

    fn set_password_hash(&mut self, password_hash: PasswordHash);

    fn activation_link_expires_at(&self) -> Option<A::DateTime>;

    fn set_activation_link_expires_at(&mut self, expires: Option<A::DateTime>);

    fn reset_password_link_expires_at(&self) -> Option<A::DateTime>;

    fn set_reset_password_link_expires_at(&mut self, expires: Option<A::DateTime>);

    /// Returns any further state which tokens should be bound to, such as the
    /// user's last login time. Whenever the returned string changes, all
    /// outstanding tokens for the user are invalidated.
    ///
    /// Default is the empty string; tokens are then bound only to the id,
    /// active flag and password hash.
    fn token_fingerprint(&self) -> String {
        String::new()
    }
}

/// Completes an activation link. The user is marked active and persisted, and
/// returned.
///
/// Since the active flag is part of the token, the link cannot be used twice.
pub async fn activate_account<A: App>(
    app: &A,
    uid: &str,
    token: &str,
) -> Result<A::User, A::Error> {
    let mut user = resolve_link(app, uid, token, TokenPurpose::Activation)
        .await?;

    user.set_active(true);
    user.set_activation_link_expires_at(None);
    app.persist_user(&user)
        .await?;

    log::info!("Activated user #{}", user.id());
    Ok(user)
}

/// Completes a password reset link by setting a new password. The new
/// password must satisfy `is_strong_password`. The user is persisted with the
/// new password hash, and returned.
///
/// Since the password hash is part of the token, the link cannot be used
/// twice.
pub async fn reset_password<A: App>(
    app: &A,
    uid: &str,
    token: &str,
    new_password: Secret,
) -> Result<A::User, A::Error> {
    let mut user = resolve_link(app, uid, token, TokenPurpose::PasswordReset)
        .await?;

    check_password_strength(&new_password)?;
    let hash = hashing::generate_password_hash(&new_password)?;

    user.set_password_hash(hash);
    user.set_reset_password_link_expires_at(None);
    app.persist_user(&user)
        .await?;

    log::info!("Reset password for user #{}", user.id());
    Ok(user)
}

/// Finds the user a link was issued to, and checks the link's token and
/// expiry time.
async fn resolve_link<A: App>(
    app: &A,
    uid: &str,
    token: &str,
    purpose: TokenPurpose,
) -> Result<A::User, A::Error> {
    let user_id = tokens::decode_uid::<A::ID>(uid)
        .ok_or(Error::InvalidUid)?;

    let Some(user) = app.get_user_by_id(user_id)
        .await?
    else {
        log::debug!("No such user #{user_id} for {purpose:?} link");
        return Error::InvalidUid.as_app_err();
    };

    if !tokens::is_token_valid(app, &user, purpose, token) {
        log::info!("Invalid {purpose:?} token for user #{user_id}");
        return Error::InvalidToken.as_app_err();
    }

    let expires = match purpose {
        TokenPurpose::Activation => user.activation_link_expires_at(),
        TokenPurpose::PasswordReset => user.reset_password_link_expires_at(),
    };
    match expires {
        Some(expires) if app.time_now() < expires => Ok(user),
        _ => {
            log::debug!("{purpose:?} link for user #{user_id} has expired");
            Error::LinkExpired.as_app_err()
        }
    }
}
