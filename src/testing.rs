//! An in-memory `App` for unit tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, SystemTime},
};

use actix_web::http::StatusCode;

use crate::{
    app::{App, AppConfig, AppDb, AppMailer, AppRenderer, AppTypes},
    mail::{EmailMessage, EmailTemplate, LinkEmailContext},
    secret::{PasswordHash, Secret},
    settings::Settings,
    users::AccountUser,
    validation::ValidationError,
};

#[derive(Debug, Clone)]
pub(crate) struct TestUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub password_hash: PasswordHash,
    pub last_login: Option<u64>,
    pub activation_link_expires_at: Option<SystemTime>,
    pub reset_password_link_expires_at: Option<SystemTime>,
}

impl TestUser {
    pub fn new(id: i64, username: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            is_active: true,
            password_hash: PasswordHash::from("$argon2id$old".to_string()),
            last_login: None,
            activation_link_expires_at: None,
            reset_password_link_expires_at: None,
        }
    }
}

impl AccountUser<MockApp> for TestUser {
    fn id(&self) -> i64 {
        self.id
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    fn set_password_hash(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
    }

    fn activation_link_expires_at(&self) -> Option<SystemTime> {
        self.activation_link_expires_at
    }

    fn set_activation_link_expires_at(&mut self, expires: Option<SystemTime>) {
        self.activation_link_expires_at = expires;
    }

    fn reset_password_link_expires_at(&self) -> Option<SystemTime> {
        self.reset_password_link_expires_at
    }

    fn set_reset_password_link_expires_at(&mut self, expires: Option<SystemTime>) {
        self.reset_password_link_expires_at = expires;
    }

    fn token_fingerprint(&self) -> String {
        self.last_login
            .map(|t| t.to_string())
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct MockState {
    users: HashMap<i64, TestUser>,
    outbox: Vec<EmailMessage>,
    rendered: Vec<serde_json::Value>,
    persist_count: usize,
    fail_mail: bool,
    fail_persist: bool,
    fail_render: bool,
    elapsed: Duration,
}

#[derive(Clone)]
pub(crate) struct MockApp {
    pub settings: Settings,
    state: Arc<Mutex<MockState>>,
}

impl MockApp {
    pub fn new() -> Self {
        Self::with_secret_key(Secret::from("test secret key"))
    }

    pub fn with_secret_key(secret_key: Secret) -> Self {
        Self {
            settings: Settings::new(secret_key, "https://app.example.com", "noreply@example.com"),
            state: Arc::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000) + self.state().elapsed
    }

    pub fn advance(&self, duration: Duration) {
        self.state().elapsed += duration;
    }

    pub fn insert_user(&self, user: &TestUser) {
        self.state().users.insert(user.id, user.clone());
    }

    pub fn stored_user(&self, id: i64) -> Option<TestUser> {
        self.state().users.get(&id).cloned()
    }

    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.state().outbox.clone()
    }

    /// The template variables of the `i`th rendered email, plus the template
    /// name under `"template"`.
    pub fn rendered_context(&self, i: usize) -> serde_json::Value {
        self.state().rendered[i].clone()
    }

    pub fn persist_count(&self) -> usize {
        self.state().persist_count
    }

    pub fn fail_mail(&self, fail: bool) {
        self.state().fail_mail = fail;
    }

    pub fn fail_persist(&self, fail: bool) {
        self.state().fail_persist = fail;
    }

    pub fn fail_render(&self, fail: bool) {
        self.state().fail_render = fail;
    }
}

impl App for MockApp {
    fn time_now(&self) -> SystemTime {
        self.now()
    }
}

impl AppTypes for MockApp {
    type ID = i64;
    type DateTime = SystemTime;
    type User = TestUser;
    type Error = ValidationError;
}

impl AppConfig for MockApp {
    fn secret_key(&self) -> &Secret {
        self.settings.secret_key()
    }

    fn frontend_base_url(&self) -> &str {
        self.settings.frontend_base_url()
    }

    fn email_host_user(&self) -> &str {
        self.settings.email_host_user()
    }

    fn link_expire_after_hours(&self) -> u64 {
        self.settings.link_expire_after_hours()
    }
}

impl AppDb for MockApp {
    async fn get_user_by_id(&self, user_id: i64) -> Result<Option<TestUser>, ValidationError> {
        Ok(self.stored_user(user_id))
    }

    async fn persist_user(&self, user: &TestUser) -> Result<(), ValidationError> {
        let mut state = self.state();
        if state.fail_persist {
            return Err(ValidationError::new(
                Some("database unavailable"),
                "detail",
                Some(StatusCode::SERVICE_UNAVAILABLE),
            ));
        }
        state.persist_count += 1;
        state.users.insert(user.id, user.clone());
        Ok(())
    }
}

impl AppMailer for MockApp {
    async fn send_email(&self, message: EmailMessage) -> Result<(), ValidationError> {
        let mut state = self.state();
        if state.fail_mail {
            return Err(ValidationError::new(
                Some("mail transport unavailable"),
                "email",
                Some(StatusCode::SERVICE_UNAVAILABLE),
            ));
        }
        state.outbox.push(message);
        Ok(())
    }
}

impl AppRenderer for MockApp {
    fn render_template(
        &self,
        template: EmailTemplate,
        context: &LinkEmailContext<'_>,
    ) -> Result<String, ValidationError> {
        if self.state().fail_render {
            return Err(ValidationError::new(
                Some("template not found"),
                "detail",
                None,
            ));
        }

        let mut value = serde_json::to_value(context)
            .map_err(|_| ValidationError::new(None, "detail", None))?;
        value["template"] = template.name().into();

        let body = value.to_string();
        self.state().rendered.push(value);
        Ok(body)
    }
}
