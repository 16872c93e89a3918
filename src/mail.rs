use std::time::Duration;

use crate::{
    app::App,
    tokens::{self, TokenPurpose},
    users::AccountUser,
    MAX_LINK_EXPIRE_AFTER_HOURS,
};

/// An email ready to be handed to the mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

/// The emails which this library sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    /// Asks a new user to confirm their email address.
    Activation,

    /// Sends a link for choosing a new password.
    ResetPassword,
}

impl EmailTemplate {
    /// The identifier of the template for the email body.
    pub fn name(self) -> &'static str {
        match self {
            Self::Activation => "authentication/activation_email.html",
            Self::ResetPassword => "authentication/forgot_password_email.html",
        }
    }

    pub fn subject(self) -> &'static str {
        match self {
            Self::Activation => "Verify Email To Activate Your Account",
            Self::ResetPassword => "Reset Your Password",
        }
    }

    pub fn purpose(self) -> TokenPurpose {
        match self {
            Self::Activation => TokenPurpose::Activation,
            Self::ResetPassword => TokenPurpose::PasswordReset,
        }
    }
}

/// The variables available to an email template. The template is expected to
/// build a link such as `{frontend_base_url}/activate/{uid}/{token}`.
///
/// This does not implement `Debug`, since it holds a token.
#[derive(serde::Serialize)]
pub struct LinkEmailContext<'a> {
    pub username: &'a str,
    pub uid: String,
    pub token: &'a str,
    pub frontend_base_url: &'a str,
}

/// Sends an activation link to the user, and marks the user as inactive until
/// they follow it.
///
/// The user is only updated and persisted after the email has been sent; if
/// rendering or sending fails, the error is returned and `user` is unchanged.
pub async fn send_activation_email<A: App>(
    app: &A,
    user: &mut A::User,
) -> Result<(), A::Error> {
    // The token must match the state which is about to be persisted.
    let mut updated = user.clone();
    updated.set_active(false);

    send_link_email(app, &updated, EmailTemplate::Activation)
        .await?;

    updated.set_activation_link_expires_at(Some(link_expiry_time(app)));
    app.persist_user(&updated)
        .await?;

    *user = updated;
    Ok(())
}

/// Sends a password reset link to the user. The user's active flag is not
/// changed.
///
/// The user is only updated and persisted after the email has been sent; if
/// rendering or sending fails, the error is returned and `user` is unchanged.
pub async fn send_reset_email<A: App>(
    app: &A,
    user: &mut A::User,
) -> Result<(), A::Error> {
    let mut updated = user.clone();

    send_link_email(app, &updated, EmailTemplate::ResetPassword)
        .await?;

    updated.set_reset_password_link_expires_at(Some(link_expiry_time(app)));
    app.persist_user(&updated)
        .await?;

    *user = updated;
    Ok(())
}

async fn send_link_email<A: App>(
    app: &A,
    user: &A::User,
    template: EmailTemplate,
) -> Result<(), A::Error> {
    let token = tokens::generate_token(app, user, template.purpose())?;

    let context = LinkEmailContext {
        username: user.username(),
        uid: tokens::encode_uid(user.id()),
        token: token.expose(),
        frontend_base_url: app.frontend_base_url(),
    };
    let body = app.render_template(template, &context)?;

    let message = EmailMessage {
        subject: template.subject().to_string(),
        body,
        from: app.email_host_user().to_string(),
        to: vec![user.email().to_string()],
    };

    app.send_email(message)
        .await?;

    log::info!("Sent {template:?} email to user #{}", user.id());
    Ok(())
}

/// Returns the DateTime at which a link issued now will expire.
fn link_expiry_time<A: App>(app: &A) -> A::DateTime {
    let hours = app.link_expire_after_hours()
        .min(MAX_LINK_EXPIRE_AFTER_HOURS);
    let duration = Duration::from_secs(hours.saturating_mul(3600));
    app.time_now() + duration
}
