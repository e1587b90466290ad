use std::{env, fmt};

use crate::{ConfigError, ConfigResult};

/// Environment variable holding the app token (consumer key).
pub const APP_TOKEN_VAR: &str = "MKM_APP_TOKEN";
/// Environment variable holding the app secret (consumer secret).
pub const APP_SECRET_VAR: &str = "MKM_APP_SECRET";
/// Environment variable holding the access token.
pub const ACCESS_TOKEN_VAR: &str = "MKM_ACCESS_TOKEN";
/// Environment variable holding the access token secret.
pub const ACCESS_TOKEN_SECRET_VAR: &str = "MKM_ACCESS_TOKEN_SECRET";

pub trait SecretsProvider {
    fn get_consumer_key_pair(&self) -> (&str, &str);

    /// Returns the access token and its secret; both are empty for widget apps.
    fn get_token_pair(&self) -> (&str, &str);

    /// `true` when neither an access token nor its secret is configured.
    fn is_anonymous(&self) -> bool {
        let (token, token_secret) = self.get_token_pair();
        token.is_empty() && token_secret.is_empty()
    }
}

impl<T> SecretsProvider for &T
where
    T: SecretsProvider + ?Sized,
{
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (**self).get_consumer_key_pair()
    }

    fn get_token_pair(&self) -> (&str, &str) {
        (**self).get_token_pair()
    }
}

/// The credential set of an MKM app.
///
/// Dedicated and personal apps carry an access token and secret; widget apps
/// sign with the app credentials alone and leave both empty.
#[derive(Clone)]
pub struct Secrets {
    consumer_key: String,
    consumer_secret: String,
    token: String,
    token_secret: String,
}

impl Secrets {
    /// Creates widget app credentials, with an empty access token and secret.
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Secrets {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: String::new(),
            token_secret: String::new(),
        }
    }

    pub fn token<TKey, TSecret>(self, token: TKey, token_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Secrets {
            token: token.into(),
            token_secret: token_secret.into(),
            ..self
        }
    }

    /// Reads the credentials from `MKM_APP_TOKEN`, `MKM_APP_SECRET`,
    /// `MKM_ACCESS_TOKEN` and `MKM_ACCESS_TOKEN_SECRET`.
    ///
    /// All four must be set. Widget apps set the access token variables to
    /// empty strings.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key).ok_or_else(|| ConfigError::MissingEnvironmentVariable(key.to_string()))
        };
        Ok(Secrets {
            consumer_key: read(APP_TOKEN_VAR)?,
            consumer_secret: read(APP_SECRET_VAR)?,
            token: read(ACCESS_TOKEN_VAR)?,
            token_secret: read(ACCESS_TOKEN_SECRET_VAR)?,
        })
    }
}

impl SecretsProvider for Secrets {
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn get_token_pair(&self) -> (&str, &str) {
        (&self.token, &self.token_secret)
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("token", &self.token)
            .field("token_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    static CONSUMER_KEY: &str = "<APP_TOKEN>";
    static CONSUMER_SECRET: &str = "<APP_SECRET>";
    static TOKEN: &str = "<ACCESS_TOKEN>";
    static TOKEN_SECRET: &str = "<ACCESS_TOKEN_SECRET>";

    #[test]
    fn widget_secrets_are_anonymous() {
        let secrets = Secrets::new(CONSUMER_KEY, CONSUMER_SECRET);
        assert!(secrets.is_anonymous());
        assert_eq!(secrets.get_token_pair(), ("", ""));

        let secrets = secrets.token(TOKEN, TOKEN_SECRET);
        assert!(!secrets.is_anonymous());
        assert_eq!(secrets.get_token_pair(), (TOKEN, TOKEN_SECRET));
        assert_eq!(
            secrets.get_consumer_key_pair(),
            (CONSUMER_KEY, CONSUMER_SECRET)
        );
    }

    #[test]
    fn debug_redacts_secrets() {
        let secrets = Secrets::new(CONSUMER_KEY, CONSUMER_SECRET).token(TOKEN, TOKEN_SECRET);
        let printed = format!("{:?}", secrets);
        assert!(printed.contains(CONSUMER_KEY));
        assert!(!printed.contains(CONSUMER_SECRET));
        assert!(!printed.contains(TOKEN_SECRET));
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let vars: HashMap<&str, &str> = vec![
            (APP_TOKEN_VAR, CONSUMER_KEY),
            (APP_SECRET_VAR, CONSUMER_SECRET),
            (ACCESS_TOKEN_VAR, ""),
            (ACCESS_TOKEN_SECRET_VAR, ""),
        ]
        .into_iter()
        .collect();
        let secrets = Secrets::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(
            secrets.get_consumer_key_pair(),
            (CONSUMER_KEY, CONSUMER_SECRET)
        );
        assert!(secrets.is_anonymous());
    }

    #[test]
    fn from_lookup_reports_missing_variable() {
        let vars: HashMap<&str, &str> = vec![(APP_TOKEN_VAR, CONSUMER_KEY)].into_iter().collect();
        let err = Secrets::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEnvironmentVariable(APP_SECRET_VAR.to_string())
        );
    }

    #[test]
    fn access_token_variables_are_required() {
        let vars: HashMap<&str, &str> = vec![
            (APP_TOKEN_VAR, CONSUMER_KEY),
            (APP_SECRET_VAR, "secret"),
            (ACCESS_TOKEN_VAR, ""),
        ]
        .into_iter()
        .collect();
        let err = Secrets::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEnvironmentVariable(ACCESS_TOKEN_SECRET_VAR.to_string())
        );
    }
}
