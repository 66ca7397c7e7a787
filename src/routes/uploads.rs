use axum::{
    Router,
    extract::{Multipart, State},
    response::Response,
    routing::post,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::uploads::{FIELD_CUSTOMER_NAME, FIELD_ORDER_ID, FIELD_PROOF_OF_PAYMENT, UploadResponse},
    error::{AppError, AppResult},
    models::FileUpload,
    response,
    state::AppState,
};

/// Documents the proof-of-payment multipart body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ProofOfPaymentUpload {
    #[schema(value_type = String, format = Binary)]
    pub proof_of_payment: Vec<u8>,
    pub order_id: Option<String>,
    pub customer_name: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/proof-of-payment", post(upload_proof_of_payment))
}

#[utoipa::path(
    post,
    path = "/api/uploads/proof-of-payment",
    request_body(content = ProofOfPaymentUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored file name", body = UploadResponse),
        (status = 400, description = "Missing proof of payment"),
    ),
    tag = "uploads"
)]
pub async fn upload_proof_of_payment(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut file = None;
    let mut order_id = None;
    let mut customer_name = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FIELD_PROOF_OF_PAYMENT => {
                let file_name = field.file_name().unwrap_or("proof-of-payment").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some(FileUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            FIELD_ORDER_ID => order_id = Some(field.text().await?),
            FIELD_CUSTOMER_NAME => customer_name = Some(field.text().await?),
            _ => {}
        }
    }

    let file = file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::BadRequest("Please select a file to upload.".into()))?;

    let stored = state
        .api
        .upload_proof_of_payment(file, order_id.as_deref(), customer_name.as_deref())
        .await?;
    Ok(match stored {
        Some(file_name) => {
            tracing::info!(file_name = %file_name, "proof of payment uploaded");
            response::ok(&UploadResponse {
                file_name: Some(file_name),
            })
        }
        None => response::bad_request("Could not upload proof of payment"),
    })
}
