//! Verification token DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RequestTokenRequest {
    #[validate(length(min = 5, max = 20))]
    pub whatsapp_number: String,
}

/// The issued code goes back in the response; delivery over WhatsApp is
/// handled by the caller.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenIssuedResponse {
    pub whatsapp_number: String,
    pub token: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyTokenRequest {
    #[validate(length(min = 5, max = 20))]
    pub whatsapp_number: String,
    #[validate(length(equal = 6))]
    pub token: String,
}
