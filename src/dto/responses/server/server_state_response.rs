use serde_derive::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ServerStateResponse {
    pub app_name_version: String,
    pub server_uptime: String,
    pub responses_handled: u64,
    pub cached_sessions: usize,
}
