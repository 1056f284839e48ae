//! Verification token API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{RequestTokenRequest, TokenIssuedResponse, VerifyTokenRequest};
use crate::application::VerificationService;
use crate::interfaces::http::common::{reject, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct TokenHandlerState {
    pub verification: Arc<VerificationService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/tokens/request",
    tag = "Verification",
    request_body = RequestTokenRequest,
    responses(
        (status = 201, description = "Code issued, replacing any outstanding one", body = ApiResponse<TokenIssuedResponse>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn request_token(
    State(state): State<TokenHandlerState>,
    ValidatedJson(request): ValidatedJson<RequestTokenRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<TokenIssuedResponse>>),
    (StatusCode, Json<ApiResponse<TokenIssuedResponse>>),
> {
    match state.verification.request(&request.whatsapp_number).await {
        Ok(token) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(TokenIssuedResponse {
                whatsapp_number: token.whatsapp_number,
                token: token.token,
            })),
        )),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/tokens/verify",
    tag = "Verification",
    request_body = VerifyTokenRequest,
    responses(
        (status = 200, description = "Code accepted and consumed"),
        (status = 401, description = "Unknown number or wrong code")
    )
)]
pub async fn verify_token(
    State(state): State<TokenHandlerState>,
    ValidatedJson(request): ValidatedJson<VerifyTokenRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .verification
        .verify(&request.whatsapp_number, &request.token)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(reject(e)),
    }
}
