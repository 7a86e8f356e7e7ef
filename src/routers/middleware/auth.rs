use std::{str::FromStr, sync::Arc};

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::{
    errors::code_error::{CodeError, HandlerResponse, code_err},
    init::state::{SESSION_COOKIE, ServerState},
};

/// Resolves the session cookie and hands the caller's user id to handlers as `Extension<Uuid>`.
pub async fn auth_middleware(
    State(state): State<Arc<ServerState>>,
    cookie_jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> HandlerResponse<impl IntoResponse> {
    let session_id = match cookie_jar.get(SESSION_COOKIE) {
        Some(session_cookie) => match Uuid::from_str(session_cookie.value()) {
            Ok(session_id) => session_id,
            Err(e) => return Err(code_err(CodeError::UNAUTHORIZED_ACCESS, e)),
        },
        None => return Err(CodeError::UNAUTHORIZED_ACCESS.into()),
    };

    let session = match state.get_session(&session_id).await {
        Ok(session) => session,
        Err(e) => return Err(code_err(CodeError::UNAUTHORIZED_ACCESS, e)),
    };

    request.extensions_mut().insert(session.get_user_id());

    let response = next.run(request).await;

    Ok(response)
}
