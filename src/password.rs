use crate::{
    errors::Error,
    secret::Secret,
    MINIMUM_PASSWORD_LENGTH,
};

/// At least one of these must appear in a strong password.
pub const PASSWORD_SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+{}[]:;<>,.?~\\-";

/// Returns `true` if the password is at least `MINIMUM_PASSWORD_LENGTH`
/// characters long and contains at least one each of: an uppercase letter,
/// a lowercase letter, a numeric character, and one of
/// `PASSWORD_SPECIAL_CHARACTERS`.
///
/// Letters and digits are judged by their Unicode categories, so `Ä` is an
/// uppercase letter and `٣` is a digit. Length is counted in characters, not
/// bytes. There is no maximum length.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MINIMUM_PASSWORD_LENGTH
        && password.chars().any(char::is_uppercase)
        && password.chars().any(char::is_lowercase)
        && password.chars().any(char::is_numeric)
        && password.chars().any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(c))
}

pub(crate) fn check_password_strength(password: &Secret) -> Result<(), Error> {
    if !is_strong_password(password.expose()) {
        return Err(Error::PasswordTooWeak);
    }
    Ok(())
}
