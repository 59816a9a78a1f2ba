use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use dpi_core_contact_contracts::{ContactSendMessageError, ContactService};
use tracing::debug;

use super::{error, internal_server_error};
use crate::models::ApiContactSuccess;

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(
            "/api/contact",
            routing::post(send_message)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    form: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let form = match form {
        Ok(Json(form)) => form,
        Err(rejection) => {
            debug!("Rejected contact form body: {rejection}");
            return error(StatusCode::BAD_REQUEST, "Invalid JSON in request body");
        }
    };

    match service.send_message(form).await {
        Ok(()) => Json(ApiContactSuccess::default()).into_response(),
        Err(ContactSendMessageError::Validation(err)) => {
            error(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(err @ ContactSendMessageError::NotConfigured(_)) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
        Err(ContactSendMessageError::Transport(err)) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    (
        [(header::ALLOW, "POST, OPTIONS")],
        error(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed. Use POST to submit contact form.",
        ),
    )
        .into_response()
}
