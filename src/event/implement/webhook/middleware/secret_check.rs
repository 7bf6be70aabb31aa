use crate::event::implement::webhook::WebHookServiceApp;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::StatusCode;

/// Rejects requests without the shared secret header, when one is configured.
pub async fn secret_check(
    State(app): State<WebHookServiceApp>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(secret) = app.secret.as_deref() else {
        return Ok(next.run(request).await);
    };
    let provided = request
        .headers()
        .get(crate::consts::HEADER_SECRET_TOKEN)
        .ok_or_else(|| {
            tracing::debug!("webhook request without secret token");
            StatusCode::UNAUTHORIZED
        })?;
    if crate::utils::secret_matches(secret, provided.as_bytes()) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("webhook request with wrong secret token");
        Err(StatusCode::UNAUTHORIZED)
    }
}
