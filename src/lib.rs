mod app;
mod errors;
mod hashing;
pub mod mail;
mod password;
mod secret;
mod settings;
mod tokens;
mod users;
mod validation;

#[cfg(test)]
mod testing;

pub use app::{
    App,
    AppConfig,
    AppDb,
    AppMailer,
    AppRenderer,
    AppTypes,
};
pub use errors::Error;
pub use mail::{
    send_activation_email,
    send_reset_email,
};
pub use password::{
    PASSWORD_SPECIAL_CHARACTERS,
    is_strong_password,
};
pub use secret::{
    PasswordHash,
    Secret,
    generate_secret_key,
};
pub use settings::Settings;
pub use tokens::{
    TokenPurpose,
    decode_uid,
    encode_uid,
    generate_token,
    is_token_valid,
};
pub use users::{
    AccountUser,
    activate_account,
    reset_password,
};
pub use validation::ValidationError;

/// The minimum length of a strong password, in characters.
pub const MINIMUM_PASSWORD_LENGTH: usize = 8;

/// Activation and reset links expire after 1 day, unless configured otherwise
/// with `AppConfig::link_expire_after_hours`.
pub const DEFAULT_LINK_EXPIRE_AFTER_HOURS: u64 = 24;

/// The longest configurable link lifetime, 10 years. Larger values of
/// `AppConfig::link_expire_after_hours` are treated as this.
pub const MAX_LINK_EXPIRE_AFTER_HOURS: u64 = 10 * 365 * 24;
