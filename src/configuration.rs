use config::ConfigError;

/// Runtime settings, loaded from the environment.
///
/// Expected variables: `DB_URL`, `TOKEN_SECRET`, `EXPIRES_IN_SECONDS`,
/// `REFRESH_EXPIRES_IN_HOURS`, `PLATFORM`, `POLKA_KEY`, and optionally
/// `PORT` (defaults to 8080).
#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub db_url: String,
    /// Symmetric secret for signing access tokens.
    pub token_secret: String,
    /// Access token lifetime in seconds.
    pub expires_in_seconds: i64,
    /// Refresh token lifetime in hours.
    pub refresh_expires_in_hours: i64,
    /// Deployment platform flag. `/admin/reset` only works on "dev".
    pub platform: String,
    /// Shared secret for the Polka subscription webhook.
    pub polka_key: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(config::Environment::default())
        .build()?;
    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::default_port;

    #[test]
    fn port_defaults_to_8080() {
        assert_eq!(default_port(), 8080);
    }
}
