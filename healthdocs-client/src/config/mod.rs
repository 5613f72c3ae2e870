use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the document backend, e.g. `http://localhost:5000`.
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Fixed identifying user sent to the login endpoint. No password is part
    /// of this design.
    #[serde(default = "default_login_user")]
    pub login_user: String,
    /// Patient id the UI layer pre-fills in the upload form.
    #[serde(default = "default_patient_id")]
    pub default_patient_id: String,
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_login_user() -> String {
    "demo".to_string()
}

fn default_patient_id() -> String {
    "demo123".to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            login_user: default_login_user(),
            default_patient_id: default_patient_id(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionSettings {
    /// Whether an authorization-expiry response drops the stored token.
    /// Off by default: the session survives "expired" notices so a later
    /// call can still succeed if the backend recovers.
    #[serde(default)]
    pub clear_token_on_expiry: bool,
}

pub fn load() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?;

    settings.try_deserialize()
}
