//! Group and template API handlers
//!
//! All routes are scoped under an owning user; every id in the path is a
//! storage id. Delegates to `GroupService`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateGroupRequest, GroupDto, TemplateDto, TemplateRequest, UpdateGroupRequest,
};
use crate::application::GroupService;
use crate::interfaces::http::common::{reject, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct GroupHandlerState {
    pub groups: Arc<GroupService>,
}

// ── Groups ──────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/groups",
    tag = "Groups",
    params(("user_id" = String, Path, description = "Owning user ID")),
    responses(
        (status = 200, description = "Groups in insertion order", body = ApiResponse<Vec<GroupDto>>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_groups(
    State(state): State<GroupHandlerState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<GroupDto>>>, (StatusCode, Json<ApiResponse<Vec<GroupDto>>>)> {
    match state.groups.list_groups(&user_id).await {
        Ok(groups) => Ok(Json(ApiResponse::success(
            groups.into_iter().map(GroupDto::from).collect(),
        ))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/groups",
    tag = "Groups",
    params(("user_id" = String, Path, description = "Owning user ID")),
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = ApiResponse<GroupDto>),
        (status = 404, description = "User not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_group(
    State(state): State<GroupHandlerState>,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateGroupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GroupDto>>), (StatusCode, Json<ApiResponse<GroupDto>>)>
{
    match state.groups.add_group(&user_id, request.into()).await {
        Ok(group) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(GroupDto::from(group))),
        )),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/groups/{group_id}",
    tag = "Groups",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("group_id" = String, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Group details", body = ApiResponse<GroupDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_group(
    State(state): State<GroupHandlerState>,
    Path((user_id, group_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<GroupDto>>, (StatusCode, Json<ApiResponse<GroupDto>>)> {
    match state.groups.get_group(&user_id, &group_id).await {
        Ok(group) => Ok(Json(ApiResponse::success(GroupDto::from(group)))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{user_id}/groups/{group_id}",
    tag = "Groups",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("group_id" = String, Path, description = "Group ID")
    ),
    request_body = UpdateGroupRequest,
    responses(
        (status = 200, description = "Group updated", body = ApiResponse<GroupDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_group(
    State(state): State<GroupHandlerState>,
    Path((user_id, group_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateGroupRequest>,
) -> Result<Json<ApiResponse<GroupDto>>, (StatusCode, Json<ApiResponse<GroupDto>>)> {
    match state
        .groups
        .update_group(&user_id, &group_id, request.into())
        .await
    {
        Ok(group) => Ok(Json(ApiResponse::success(GroupDto::from(group)))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/groups/{group_id}",
    tag = "Groups",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("group_id" = String, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Group and its templates deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_group(
    State(state): State<GroupHandlerState>,
    Path((user_id, group_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.groups.remove_group(&user_id, &group_id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(reject(e)),
    }
}

// ── Templates ───────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/groups/{group_id}/templates",
    tag = "Templates",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("group_id" = String, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Templates in insertion order", body = ApiResponse<Vec<TemplateDto>>),
        (status = 404, description = "Not found")
    )
)]
pub async fn list_templates(
    State(state): State<GroupHandlerState>,
    Path((user_id, group_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<TemplateDto>>>, (StatusCode, Json<ApiResponse<Vec<TemplateDto>>>)>
{
    match state.groups.list_templates(&user_id, &group_id).await {
        Ok(templates) => Ok(Json(ApiResponse::success(
            templates.into_iter().map(TemplateDto::from).collect(),
        ))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/groups/{group_id}/templates",
    tag = "Templates",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("group_id" = String, Path, description = "Group ID")
    ),
    request_body = TemplateRequest,
    responses(
        (status = 201, description = "Template created", body = ApiResponse<TemplateDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn create_template(
    State(state): State<GroupHandlerState>,
    Path((user_id, group_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<TemplateRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<TemplateDto>>),
    (StatusCode, Json<ApiResponse<TemplateDto>>),
> {
    match state
        .groups
        .add_template(&user_id, &group_id, request.content)
        .await
    {
        Ok(template) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(TemplateDto::from(template))),
        )),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/groups/{group_id}/templates/{template_id}",
    tag = "Templates",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("group_id" = String, Path, description = "Group ID"),
        ("template_id" = String, Path, description = "Template ID")
    ),
    responses(
        (status = 200, description = "Template details", body = ApiResponse<TemplateDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_template(
    State(state): State<GroupHandlerState>,
    Path((user_id, group_id, template_id)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<TemplateDto>>, (StatusCode, Json<ApiResponse<TemplateDto>>)> {
    match state
        .groups
        .get_template(&user_id, &group_id, &template_id)
        .await
    {
        Ok(template) => Ok(Json(ApiResponse::success(TemplateDto::from(template)))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{user_id}/groups/{group_id}/templates/{template_id}",
    tag = "Templates",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("group_id" = String, Path, description = "Group ID"),
        ("template_id" = String, Path, description = "Template ID")
    ),
    request_body = TemplateRequest,
    responses(
        (status = 200, description = "Template updated", body = ApiResponse<TemplateDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_template(
    State(state): State<GroupHandlerState>,
    Path((user_id, group_id, template_id)): Path<(String, String, String)>,
    ValidatedJson(request): ValidatedJson<TemplateRequest>,
) -> Result<Json<ApiResponse<TemplateDto>>, (StatusCode, Json<ApiResponse<TemplateDto>>)> {
    match state
        .groups
        .update_template(&user_id, &group_id, &template_id, request.content)
        .await
    {
        Ok(template) => Ok(Json(ApiResponse::success(TemplateDto::from(template)))),
        Err(e) => Err(reject(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/groups/{group_id}/templates/{template_id}",
    tag = "Templates",
    params(
        ("user_id" = String, Path, description = "Owning user ID"),
        ("group_id" = String, Path, description = "Group ID"),
        ("template_id" = String, Path, description = "Template ID")
    ),
    responses(
        (status = 200, description = "Template deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_template(
    State(state): State<GroupHandlerState>,
    Path((user_id, group_id, template_id)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .groups
        .remove_template(&user_id, &group_id, &template_id)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(reject(e)),
    }
}
