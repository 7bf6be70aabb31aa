use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{
    error::ErrorKind,
    event::{
        implement::webhook::WebHookServiceApp,
        model::{Reply, WebhookPayload},
    },
};

/// Body of every rejected request
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorDetail {
    pub detail: String,
}

type Rejection = (StatusCode, Json<ErrorDetail>);

fn reject(status: StatusCode, detail: impl Into<String>) -> Rejection {
    (
        status,
        Json(ErrorDetail {
            detail: detail.into(),
        }),
    )
}

pub async fn webhook_service(
    State(app): State<WebHookServiceApp>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Reply>, Rejection> {
    let body = body.map_err(|e| {
        tracing::debug!(%e, "failed to read webhook body");
        reject(e.status(), e.body_text())
    })?;
    // parsed regardless of content-type
    let payload: WebhookPayload = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(%e, "malformed webhook body");
        let status = match e.classify() {
            serde_json::error::Category::Data => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_REQUEST,
        };
        reject(status, e.to_string())
    })?;
    let envelope = payload.into_envelope().map_err(|e| {
        tracing::debug!(%e, "invalid webhook envelope");
        reject(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;
    app.dispatcher
        .dispatch(&envelope)
        .await
        .map(Json)
        .map_err(|e| match e.kind() {
            ErrorKind::UnknownMessageType(message_type) => reject(
                StatusCode::BAD_REQUEST,
                format!("Unknown message type: {}", message_type),
            ),
            _ => {
                tracing::error!(%e, "failed to dispatch envelope");
                reject(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        })
}
