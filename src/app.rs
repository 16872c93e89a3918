use crate::{
    errors::Error,
    mail::{EmailMessage, EmailTemplate, LinkEmailContext},
    secret::Secret,
    users::AccountUser,
    DEFAULT_LINK_EXPIRE_AFTER_HOURS,
};

pub trait App: AppConfig + AppDb + AppMailer + AppRenderer + AppTypes + Clone + 'static {
    /// Returns the current time.
    fn time_now(&self) -> Self::DateTime;
}

pub trait AppTypes: Sized {
    /// The type of a numeric ID in the database; usually `i64`, `i32`, etc.
    type ID: Into<i64> + TryFrom<i64> + Eq + Copy + std::fmt::Display;

    /// The type used to represent a date and time in the application.
    type DateTime: Copy + Ord + core::ops::Add<std::time::Duration, Output = Self::DateTime>;

    /// The type of a user in the application.
    type User: AccountUser<Self> + Clone;

    /// A type representing an application error. This must support conversion
    /// from `authlinks::Error`; `authlinks::ValidationError` is one option.
    type Error: From<Error> + actix_web::ResponseError;
}

/// This trait defines functions which provide configuration parameters to the
/// library. `authlinks::Settings` implements it, so an application can load a
/// `Settings` from its config file and delegate to it.
pub trait AppConfig {
    /// Returns the process-wide key which tokens are derived from. Changing
    /// the key invalidates every outstanding link.
    fn secret_key(&self) -> &Secret;

    /// Returns the base URL of the frontend which serves the activation and
    /// reset pages, e.g. `https://example.com`. It is passed to the email
    /// templates, which build the links.
    fn frontend_base_url(&self) -> &str;

    /// Returns the address which emails are sent from.
    fn email_host_user(&self) -> &str;

    /// Returns the number of hours after which an activation or reset link
    /// expires.
    ///
    /// Default is 1 day.
    fn link_expire_after_hours(&self) -> u64 {
        DEFAULT_LINK_EXPIRE_AFTER_HOURS
    }
}

/// This trait defines functions which will be used by the library to load and
/// save users. Users are only ever saved whole; an implementation which needs
/// stronger guarantees against concurrent requests for the same user should
/// make `persist_user` a single atomic update.
#[trait_variant::make(Send)]
pub trait AppDb: AppTypes {
    /// Gets a user by their id.
    ///
    /// Returns `None` if there is no user with that id.
    async fn get_user_by_id(
        &self,
        user_id: Self::ID,
    ) -> Result<Option<Self::User>, Self::Error>;

    /// Saves the user's active flag, password hash and link expiry times.
    async fn persist_user(&self, user: &Self::User) -> Result<(), Self::Error>;
}

/// This trait defines the mail transport.
#[trait_variant::make(Send)]
pub trait AppMailer: AppTypes {
    /// Sends an email message. Errors are returned to the caller of
    /// `send_activation_email` or `send_reset_email` as they are; the library
    /// does not retry.
    async fn send_email(&self, message: EmailMessage) -> Result<(), Self::Error>;
}

/// This trait defines the template renderer used for email bodies.
pub trait AppRenderer: AppTypes {
    /// Renders the body of an email. `template.name()` identifies the
    /// template, and `context` supplies its variables. `LinkEmailContext`
    /// implements `serde::Serialize`, for renderers which take a serializable
    /// context.
    fn render_template(
        &self,
        template: EmailTemplate,
        context: &LinkEmailContext<'_>,
    ) -> Result<String, Self::Error>;
}
