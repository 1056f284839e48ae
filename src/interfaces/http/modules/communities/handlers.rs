//! Community API handlers
//!
//! Community CRUD plus the question set, submitted answers and events.
//! Delegates to `CommunityService`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AnswerDto, CommunityDto, CreateCommunityRequest, CreateEventRequest, EventDto,
    SubmitAnswerRequest, UpdateCommunityRequest, UpdateQuestionRequest,
};
use crate::application::CommunityService;
use crate::interfaces::http::common::{reject, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct CommunityHandlerState {
    pub communities: Arc<CommunityService>,
}

// ── Communities ─────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/communities",
    tag = "Communities",
    params(("user_id" = String, Path, description = "Owning user ID")),
    responses(
        (status = 200, description = "Communities in insertion order", body = ApiResponse<Vec<CommunityDto>>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_communities(
    State(state): State<CommunityHandlerState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CommunityDto>>>, (StatusCode, Json<ApiResponse<Vec<CommunityDto>>>)>
{
    match state.communities.list_communities(&user_id).await {
        Ok(communities) => Ok(Json(ApiResponse::success(
            communities.into_iter().map(CommunityDto::from).collect(),
        ))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/communities",
    tag = "Communities",
    params(("user_id" = String, Path, description = "Owning user ID")),
    request_body = CreateCommunityRequest,
    responses(
        (status = 201, description = "Community created", body = ApiResponse<CommunityDto>),
        (status = 404, description = "User not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_community(
    State(state): State<CommunityHandlerState>,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCommunityRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<CommunityDto>>),
    (StatusCode, Json<ApiResponse<CommunityDto>>),
> {
    match state.communities.add_community(&user_id, request.into()).await {
        Ok(community) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(CommunityDto::from(community))),
        )),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/communities/{community_id}",
    tag = "Communities",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("community_id" = String, Path, description = "Community ID")
    ),
    responses(
        (status = 200, description = "Community details", body = ApiResponse<CommunityDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_community(
    State(state): State<CommunityHandlerState>,
    Path((user_id, community_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<CommunityDto>>, (StatusCode, Json<ApiResponse<CommunityDto>>)> {
    match state.communities.get_community(&user_id, &community_id).await {
        Ok(community) => Ok(Json(ApiResponse::success(CommunityDto::from(community)))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{user_id}/communities/{community_id}",
    tag = "Communities",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("community_id" = String, Path, description = "Community ID")
    ),
    request_body = UpdateCommunityRequest,
    responses(
        (status = 200, description = "Community updated", body = ApiResponse<CommunityDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_community(
    State(state): State<CommunityHandlerState>,
    Path((user_id, community_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateCommunityRequest>,
) -> Result<Json<ApiResponse<CommunityDto>>, (StatusCode, Json<ApiResponse<CommunityDto>>)> {
    match state
        .communities
        .update_community(&user_id, &community_id, request.into())
        .await
    {
        Ok(community) => Ok(Json(ApiResponse::success(CommunityDto::from(community)))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/communities/{community_id}",
    tag = "Communities",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("community_id" = String, Path, description = "Community ID")
    ),
    responses(
        (status = 200, description = "Community and its sub-entities deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_community(
    State(state): State<CommunityHandlerState>,
    Path((user_id, community_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .communities
        .remove_community(&user_id, &community_id)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(reject(e)),
    }
}

// ── Questions & answers ─────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/communities/{community_id}/questions",
    tag = "Communities",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("community_id" = String, Path, description = "Community ID")
    ),
    responses(
        (status = 200, description = "Current question set", body = ApiResponse<Vec<String>>),
        (status = 404, description = "Not found")
    )
)]
pub async fn list_questions(
    State(state): State<CommunityHandlerState>,
    Path((user_id, community_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<String>>>, (StatusCode, Json<ApiResponse<Vec<String>>>)> {
    match state.communities.questions(&user_id, &community_id).await {
        Ok(questions) => Ok(Json(ApiResponse::success(questions))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}/communities/{community_id}/questions/{index}",
    tag = "Communities",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("community_id" = String, Path, description = "Community ID"),
        ("index" = usize, Path, description = "Zero-based question position")
    ),
    request_body = UpdateQuestionRequest,
    responses(
        (status = 200, description = "Updated question set", body = ApiResponse<Vec<String>>),
        (status = 400, description = "Index out of range"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_question(
    State(state): State<CommunityHandlerState>,
    Path((user_id, community_id, index)): Path<(String, String, usize)>,
    ValidatedJson(request): ValidatedJson<UpdateQuestionRequest>,
) -> Result<Json<ApiResponse<Vec<String>>>, (StatusCode, Json<ApiResponse<Vec<String>>>)> {
    match state
        .communities
        .update_question(&user_id, &community_id, index, request.question)
        .await
    {
        Ok(questions) => Ok(Json(ApiResponse::success(questions))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/communities/{community_id}/answers",
    tag = "Communities",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("community_id" = String, Path, description = "Community ID")
    ),
    request_body = SubmitAnswerRequest,
    responses(
        (status = 201, description = "Answer recorded with a question snapshot", body = ApiResponse<AnswerDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn submit_answer(
    State(state): State<CommunityHandlerState>,
    Path((user_id, community_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<SubmitAnswerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AnswerDto>>), (StatusCode, Json<ApiResponse<AnswerDto>>)>
{
    match state
        .communities
        .add_answer(&user_id, &community_id, request.answer)
        .await
    {
        Ok(answer) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(AnswerDto::from(answer))),
        )),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/communities/{community_id}/answers/{answer_id}",
    tag = "Communities",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("community_id" = String, Path, description = "Community ID"),
        ("answer_id" = String, Path, description = "Answer ID")
    ),
    responses(
        (status = 200, description = "Answer details", body = ApiResponse<AnswerDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_answer(
    State(state): State<CommunityHandlerState>,
    Path((user_id, community_id, answer_id)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<AnswerDto>>, (StatusCode, Json<ApiResponse<AnswerDto>>)> {
    match state
        .communities
        .get_answer(&user_id, &community_id, &answer_id)
        .await
    {
        Ok(answer) => Ok(Json(ApiResponse::success(AnswerDto::from(answer)))),
        Err(e) => Err(reject(e)),
    }
}

// ── Events ──────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/communities/{community_id}/events",
    tag = "Events",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("community_id" = String, Path, description = "Community ID")
    ),
    responses(
        (status = 200, description = "Events in insertion order", body = ApiResponse<Vec<EventDto>>),
        (status = 404, description = "Not found")
    )
)]
pub async fn list_events(
    State(state): State<CommunityHandlerState>,
    Path((user_id, community_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<EventDto>>>, (StatusCode, Json<ApiResponse<Vec<EventDto>>>)> {
    match state.communities.list_events(&user_id, &community_id).await {
        Ok(events) => Ok(Json(ApiResponse::success(
            events.into_iter().map(EventDto::from).collect(),
        ))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/communities/{community_id}/events",
    tag = "Events",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("community_id" = String, Path, description = "Community ID")
    ),
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = ApiResponse<EventDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_event(
    State(state): State<CommunityHandlerState>,
    Path((user_id, community_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EventDto>>), (StatusCode, Json<ApiResponse<EventDto>>)>
{
    match state
        .communities
        .add_event(&user_id, &community_id, request.into())
        .await
    {
        Ok(event) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(EventDto::from(event))),
        )),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/communities/{community_id}/events/{event_id}",
    tag = "Events",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("community_id" = String, Path, description = "Community ID"),
        ("event_id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event details", body = ApiResponse<EventDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_event(
    State(state): State<CommunityHandlerState>,
    Path((user_id, community_id, event_id)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<EventDto>>, (StatusCode, Json<ApiResponse<EventDto>>)> {
    match state
        .communities
        .get_event(&user_id, &community_id, &event_id)
        .await
    {
        Ok(event) => Ok(Json(ApiResponse::success(EventDto::from(event)))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/communities/{community_id}/events/{event_id}",
    tag = "Events",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("community_id" = String, Path, description = "Community ID"),
        ("event_id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_event(
    State(state): State<CommunityHandlerState>,
    Path((user_id, community_id, event_id)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .communities
        .remove_event(&user_id, &community_id, &event_id)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(reject(e)),
    }
}
