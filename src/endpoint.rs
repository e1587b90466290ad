use std::fmt;

use url::Url;

use crate::{ConfigError, ConfigResult};

/// Base URL of the production API, JSON output.
pub const PRODUCTION_BASE_URL: &str = "https://api.cardmarket.com/ws/v2.0/output.json";
/// Base URL of the sandbox API, JSON output.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.cardmarket.com/ws/v2.0/output.json";

/// The API root that resource paths are appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Production,
    Sandbox,
    /// Any other root, e.g. the XML output flavor or a local stub.
    Custom(String),
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::Production
    }
}

impl Endpoint {
    pub fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            Endpoint::Sandbox
        } else {
            Endpoint::Production
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            Endpoint::Production => PRODUCTION_BASE_URL,
            Endpoint::Sandbox => SANDBOX_BASE_URL,
            Endpoint::Custom(url) => url,
        }
    }

    /// Builds the full URL of `path`.
    ///
    /// The path is appended verbatim: `/account` on the production root
    /// yields `.../output.json/account`.
    pub fn resolve(&self, path: &str) -> ConfigResult<Url> {
        let full = format!("{}{}", self.base_url(), path);
        Url::parse(&full).map_err(|e| ConfigError::InvalidUrl(format!("{} ({})", full, e)))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_flag() {
        assert_eq!(Endpoint::from_sandbox_flag(true), Endpoint::Sandbox);
        assert_eq!(Endpoint::from_sandbox_flag(false), Endpoint::Production);
        assert_eq!(Endpoint::default(), Endpoint::Production);
    }

    #[test]
    fn resolve_appends_path() {
        let url = Endpoint::Production.resolve("/games/1/expansions").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.cardmarket.com/ws/v2.0/output.json/games/1/expansions"
        );
        let url = Endpoint::Sandbox.resolve("/account").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sandbox.cardmarket.com/ws/v2.0/output.json/account"
        );
    }

    #[test]
    fn resolve_rejects_garbage() {
        let endpoint = Endpoint::Custom("not a url".to_string());
        assert!(matches!(
            endpoint.resolve("/account"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
