//! API Router with Swagger UI
//!
//! Routes are unauthenticated; login exists to issue a JWT for clients
//! to hold, but no route checks one.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AccountService, CommunityService, GroupService, VerificationService};
use crate::domain::{TokenStore, UserStore};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::{auth, communities, groups, health, tokens, users};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        // Users
        users::handlers::list_users,
        users::handlers::get_user,
        users::handlers::delete_user,
        // Groups
        groups::handlers::list_groups,
        groups::handlers::create_group,
        groups::handlers::get_group,
        groups::handlers::update_group,
        groups::handlers::delete_group,
        // Templates
        groups::handlers::list_templates,
        groups::handlers::create_template,
        groups::handlers::get_template,
        groups::handlers::update_template,
        groups::handlers::delete_template,
        // Communities
        communities::handlers::list_communities,
        communities::handlers::create_community,
        communities::handlers::get_community,
        communities::handlers::update_community,
        communities::handlers::delete_community,
        communities::handlers::list_questions,
        communities::handlers::update_question,
        communities::handlers::submit_answer,
        communities::handlers::get_answer,
        // Events
        communities::handlers::list_events,
        communities::handlers::create_event,
        communities::handlers::get_event,
        communities::handlers::delete_event,
        // Verification
        tokens::handlers::request_token,
        tokens::handlers::verify_token,
    ),
    components(
        schemas(
            ApiResponse<String>,
            // Auth
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Users
            users::UserDto,
            // Groups
            groups::GroupDto,
            groups::TemplateDto,
            groups::CreateGroupRequest,
            groups::UpdateGroupRequest,
            groups::TemplateRequest,
            // Communities
            communities::CommunityDto,
            communities::AnswerDto,
            communities::EventDto,
            communities::CreateCommunityRequest,
            communities::UpdateCommunityRequest,
            communities::UpdateQuestionRequest,
            communities::SubmitAnswerRequest,
            communities::CreateEventRequest,
            // Verification
            tokens::RequestTokenRequest,
            tokens::TokenIssuedResponse,
            tokens::VerifyTokenRequest,
            // Health
            health::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "Account registration and login (JWT)"),
        (name = "Users", description = "Account management"),
        (name = "Groups", description = "WhatsApp groups embedded in an account"),
        (name = "Templates", description = "Message templates inside a group"),
        (name = "Communities", description = "Communities with onboarding questions and answers"),
        (name = "Events", description = "Events inside a community"),
        (name = "Verification", description = "One-time WhatsApp verification codes"),
    ),
    info(
        title = "Groupnest API",
        version = "1.0.0",
        description = "REST API for managing WhatsApp groups and communities",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    user_store: Arc<dyn UserStore>,
    token_store: Arc<dyn TokenStore>,
    jwt_config: JwtConfig,
) -> Router {
    let accounts = Arc::new(AccountService::new(user_store.clone(), jwt_config));
    let groups_service = Arc::new(GroupService::new(user_store.clone()));
    let communities_service = Arc::new(CommunityService::new(user_store));
    let verification = Arc::new(VerificationService::new(token_store));

    // Auth routes
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(auth::AuthHandlerState { accounts: accounts.clone() });

    // Account routes
    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route(
            "/{user_id}",
            get(users::get_user).delete(users::delete_user),
        )
        .with_state(users::UserHandlerState { accounts });

    // Group + template routes, nested under the owning user
    let group_routes = Router::new()
        .route(
            "/{user_id}/groups",
            get(groups::list_groups).post(groups::create_group),
        )
        .route(
            "/{user_id}/groups/{group_id}",
            get(groups::get_group)
                .patch(groups::update_group)
                .delete(groups::delete_group),
        )
        .route(
            "/{user_id}/groups/{group_id}/templates",
            get(groups::list_templates).post(groups::create_template),
        )
        .route(
            "/{user_id}/groups/{group_id}/templates/{template_id}",
            get(groups::get_template)
                .patch(groups::update_template)
                .delete(groups::delete_template),
        )
        .with_state(groups::GroupHandlerState {
            groups: groups_service,
        });

    // Community routes, nested under the owning user
    let community_routes = Router::new()
        .route(
            "/{user_id}/communities",
            get(communities::list_communities).post(communities::create_community),
        )
        .route(
            "/{user_id}/communities/{community_id}",
            get(communities::get_community)
                .patch(communities::update_community)
                .delete(communities::delete_community),
        )
        .route(
            "/{user_id}/communities/{community_id}/questions",
            get(communities::list_questions),
        )
        .route(
            "/{user_id}/communities/{community_id}/questions/{index}",
            put(communities::update_question),
        )
        .route(
            "/{user_id}/communities/{community_id}/answers",
            post(communities::submit_answer),
        )
        .route(
            "/{user_id}/communities/{community_id}/answers/{answer_id}",
            get(communities::get_answer),
        )
        .route(
            "/{user_id}/communities/{community_id}/events",
            get(communities::list_events).post(communities::create_event),
        )
        .route(
            "/{user_id}/communities/{community_id}/events/{event_id}",
            get(communities::get_event).delete(communities::delete_event),
        )
        .with_state(communities::CommunityHandlerState {
            communities: communities_service,
        });

    // Verification code routes
    let token_routes = Router::new()
        .route("/request", post(tokens::request_token))
        .route("/verify", post(tokens::verify_token))
        .with_state(tokens::TokenHandlerState { verification });

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/users", group_routes)
        .nest("/api/v1/users", community_routes)
        .nest("/api/v1/tokens", token_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::{SeaOrmTokenStore, SeaOrmUserStore};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "router-test-secret".into(),
            expiration_hours: 1,
            issuer: "groupnest".into(),
        }
    }

    async fn app() -> Router {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        create_api_router(
            Arc::new(SeaOrmUserStore::new(db.clone())),
            Arc::new(SeaOrmTokenStore::new(db)),
            jwt_config(),
        )
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn register_user(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/auth/register",
            Some(json!({
                "name": "Ada",
                "whatsapp_number": "2348011112222",
                "email": "ada@example.com",
                "password": "correct-horse"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn routes_work_without_an_authorization_header() {
        let app = app().await;
        let user_id = register_user(&app).await;

        // No Authorization header anywhere in this test.
        let (status, body) = send(&app, Method::GET, "/api/v1/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/v1/users/{}/groups", user_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/v1/users/{}/communities", user_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn login_returns_a_bearer_token() {
        let app = app().await;
        let user_id = register_user(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/auth/login",
            Some(json!({"email": "ada@example.com", "password": "correct-horse"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["token_type"], "Bearer");
        assert_eq!(body["data"]["user_id"], user_id);
        assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn login_failures_share_one_status() {
        let app = app().await;
        register_user(&app).await;

        let (wrong_password, _) = send(
            &app,
            Method::POST,
            "/api/v1/auth/login",
            Some(json!({"email": "ada@example.com", "password": "wrong"})),
        )
        .await;
        let (unknown_email, _) = send(
            &app,
            Method::POST,
            "/api/v1/auth/login",
            Some(json!({"email": "nobody@example.com", "password": "correct-horse"})),
        )
        .await;

        assert_eq!(wrong_password, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_email, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn user_payload_never_carries_the_password_hash() {
        let app = app().await;
        let user_id = register_user(&app).await;

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/users/{}", user_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "ada@example.com");
        assert!(body["data"].get("password_hash").is_none());
        assert!(body["data"].get("password").is_none());
    }

    #[tokio::test]
    async fn group_and_template_flow() {
        let app = app().await;
        let user_id = register_user(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/users/{}/groups", user_id),
            Some(json!({
                "group_name": "Makers",
                "description": "builders welcome",
                "paid": false,
                "group_link": "https://chat.whatsapp.com/abc"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let group_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/v1/users/{}/groups/{}/templates", user_id, group_id),
            Some(json!({"content": "Welcome to the group!"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/api/v1/users/{}/groups/{}", user_id, group_id),
            Some(json!({"description": "everyone welcome"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["description"], "everyone welcome");
        assert_eq!(body["data"]["group_name"], "Makers");

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/users/{}/groups", user_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(
            body["data"][0]["templates"].as_array().unwrap().len(),
            1
        );

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/users/{}/groups/{}", user_id, group_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/v1/users/{}/groups/{}", user_id, group_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn community_answer_snapshot_flow() {
        let app = app().await;
        let user_id = register_user(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/users/{}/communities", user_id),
            Some(json!({
                "group_name": "Makers Hub",
                "group_link": "https://chat.whatsapp.com/hub",
                "paid": false,
                "question_set": ["Why join?"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let community_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            &format!(
                "/api/v1/users/{}/communities/{}/answers",
                user_id, community_id
            ),
            Some(json!({"answer": ["For the community"]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let answer_id = body["data"]["id"].as_str().unwrap().to_string();

        // Rewriting the question must not touch the stored snapshot.
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!(
                "/api/v1/users/{}/communities/{}/questions/0",
                user_id, community_id
            ),
            Some(json!({"question": "Who invited you?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            Method::GET,
            &format!(
                "/api/v1/users/{}/communities/{}/answers/{}",
                user_id, community_id, answer_id
            ),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["question"][0], "Why join?");

        // Out-of-range index is a client error.
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!(
                "/api/v1/users/{}/communities/{}/questions/9",
                user_id, community_id
            ),
            Some(json!({"question": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn event_flow() {
        let app = app().await;
        let user_id = register_user(&app).await;

        let (_, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/users/{}/communities", user_id),
            Some(json!({
                "group_name": "Makers Hub",
                "group_link": "https://chat.whatsapp.com/hub"
            })),
        )
        .await;
        let community_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            &format!(
                "/api/v1/users/{}/communities/{}/events",
                user_id, community_id
            ),
            Some(json!({
                "title": "Launch night",
                "date": "2025-03-01",
                "time": "18:00",
                "duration": "2h",
                "location": "Lagos",
                "location_details": "Hall B",
                "details": "Demo and drinks",
                "cover_image": "https://img.example.com/launch.png",
                "paid": true,
                "amount": 1500.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let event_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!(
                "/api/v1/users/{}/communities/{}/events/{}",
                user_id, community_id, event_id
            ),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            Method::GET,
            &format!(
                "/api/v1/users/{}/communities/{}/events/{}",
                user_id, community_id, event_id
            ),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn verification_code_roundtrip() {
        let app = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/tokens/request",
            Some(json!({"whatsapp_number": "2348099990000"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let code = body["data"]["token"].as_str().unwrap().to_string();
        assert_eq!(code.len(), 6);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/tokens/verify",
            Some(json!({"whatsapp_number": "2348099990000", "token": code})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Consumed codes are rejected on replay.
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/tokens/verify",
            Some(json!({"whatsapp_number": "2348099990000", "token": code})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_conflict() {
        let app = app().await;
        register_user(&app).await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/auth/register",
            Some(json!({
                "name": "Ada Again",
                "whatsapp_number": "2348011112223",
                "email": "ada@example.com",
                "password": "another-pass"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
