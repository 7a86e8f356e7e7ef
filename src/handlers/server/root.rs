use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use crate::{
    dto::responses::{response_data::http_resp, server::server_state_response::ServerStateResponse},
    errors::code_error::HandlerResponse,
    init::state::ServerState,
    util::time::{duration_formatter::format_duration, now::tokio_now},
};

#[utoipa::path(
    get,
    path = "/api/healthcheck/state",
    tag = "server",
    responses(
        (status = 200, description = "Uptime and request counters", body = ServerStateResponse)
    )
)]
pub async fn root_handler(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    Ok(http_resp(
        ServerStateResponse {
            app_name_version: state.get_app_name_version(),
            server_uptime: format_duration(state.get_uptime()),
            responses_handled: state.get_responses_handled(),
            cached_sessions: state.get_session_length(),
        },
        (),
        start,
    ))
}
