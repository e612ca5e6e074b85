//! Auth configuration types

/// Authentication configuration for outgoing requests
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password (may be omitted by the caller)
        password: Option<String>,
    },
}

impl AuthConfig {
    /// Build a Basic config from optional credentials.
    ///
    /// Credentials only take effect when a username is present.
    pub fn from_credentials(username: Option<String>, password: Option<String>) -> Self {
        match username {
            Some(username) => Self::Basic { username, password },
            None => Self::None,
        }
    }

    /// Whether any credentials are attached
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Passwords stay out of logs and panic messages.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, password } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &password.as_ref().map(|_| "***"))
                .finish(),
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        assert!(AuthConfig::default().is_none());
    }

    #[test]
    fn test_from_credentials() {
        let config = AuthConfig::from_credentials(Some("user".into()), Some("pw".into()));
        assert_eq!(
            config,
            AuthConfig::Basic {
                username: "user".to_string(),
                password: Some("pw".to_string())
            }
        );

        // A password on its own is not a credential
        let config = AuthConfig::from_credentials(None, Some("pw".into()));
        assert!(config.is_none());
    }

    #[test]
    fn test_debug_masks_password() {
        let config = AuthConfig::from_credentials(Some("user".into()), Some("secret".into()));
        let rendered = format!("{config:?}");
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("secret"));
    }
}
