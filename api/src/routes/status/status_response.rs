use contextor::EngineSettings;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always `true`: the service does not start without both keys.
    pub credentials_loaded: bool,
    pub index_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_index_error: Option<String>,
    pub settings: EngineSettings,
    pub live_sessions: usize,
}
