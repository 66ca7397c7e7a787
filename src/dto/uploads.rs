use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const FIELD_PROOF_OF_PAYMENT: &str = "ProofOfPayment";
pub const FIELD_ORDER_ID: &str = "OrderId";
pub const FIELD_CUSTOMER_NAME: &str = "CustomerName";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default)]
    pub file_name: Option<String>,
}
