use async_trait::async_trait;
use serde_json::Value;

use crate::models::ProviderConfig;

/// Uniform contract for a remote generation or classification service
///
/// `call` never fails past this boundary: non-2xx statuses, network errors,
/// timeouts and undecodable bodies are logged by the implementation and
/// reported as `None`.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Send `payload` to the endpoint in `config` and return the JSON body
    async fn call(&self, config: &ProviderConfig, payload: &Value) -> Option<Value>;
}
