use serde::{Deserialize, Serialize};

/// Whether a request carries the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Token,
    Anonymous,
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token => write!(f, "token"),
            Self::Anonymous => write!(f, "anonymous"),
        }
    }
}

/// Target of a single provider call; built per attempt and then discarded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub model_id: String,
    pub endpoint: String,
    pub use_auth: bool,
}

impl ProviderConfig {
    /// Build a config from an endpoint template containing `{model}`
    pub fn from_template(template: &str, model_id: &str, use_auth: bool) -> Self {
        Self {
            model_id: model_id.to_string(),
            endpoint: template.replace("{model}", model_id),
            use_auth,
        }
    }

    pub fn auth_mode(&self) -> AuthMode {
        if self.use_auth {
            AuthMode::Token
        } else {
            AuthMode::Anonymous
        }
    }
}
