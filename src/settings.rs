use crate::{
    app::AppConfig,
    secret::Secret,
    DEFAULT_LINK_EXPIRE_AFTER_HOURS,
    MAX_LINK_EXPIRE_AFTER_HOURS,
};

/// Read-only configuration for activation and reset emails. Construct it once
/// at startup, e.g. by deserializing a section of the application's config
/// file, and hand it to the `App` implementation.
///
/// `link_expire_after_hours` defaults to 24 and may not exceed
/// `MAX_LINK_EXPIRE_AFTER_HOURS`.
///
/// ```json
/// {
///     "secret_key": "…",
///     "frontend_base_url": "https://example.com",
///     "email_host_user": "noreply@example.com"
/// }
/// ```
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub secret_key: Secret,
    pub frontend_base_url: String,
    pub email_host_user: String,
    #[serde(
        default = "default_link_expire_after_hours",
        deserialize_with = "deserialize_link_expire_after_hours"
    )]
    pub link_expire_after_hours: u64,
}

fn default_link_expire_after_hours() -> u64 {
    DEFAULT_LINK_EXPIRE_AFTER_HOURS
}

fn deserialize_link_expire_after_hours<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let hours = <u64 as serde::Deserialize>::deserialize(deserializer)?;
    if hours > MAX_LINK_EXPIRE_AFTER_HOURS {
        return Err(serde::de::Error::custom(format!(
            "link_expire_after_hours must be at most {MAX_LINK_EXPIRE_AFTER_HOURS}",
        )));
    }
    Ok(hours)
}

impl Settings {
    pub fn new(
        secret_key: Secret,
        frontend_base_url: impl Into<String>,
        email_host_user: impl Into<String>,
    ) -> Self {
        Self {
            secret_key,
            frontend_base_url: frontend_base_url.into(),
            email_host_user: email_host_user.into(),
            link_expire_after_hours: DEFAULT_LINK_EXPIRE_AFTER_HOURS,
        }
    }
}

impl AppConfig for Settings {
    fn secret_key(&self) -> &Secret {
        &self.secret_key
    }

    fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    fn email_host_user(&self) -> &str {
        &self.email_host_user
    }

    fn link_expire_after_hours(&self) -> u64 {
        self.link_expire_after_hours
    }
}
