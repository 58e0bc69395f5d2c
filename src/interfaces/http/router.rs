//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::identity::IdentityService;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::AccountRepository;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{auth, health};

/// Maximum accepted upload size for the delivery image endpoint.
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::signin,
        auth::handlers::user_signup,
        auth::handlers::delivery_signup,
        auth::handlers::get_account_id,
        auth::handlers::update_image,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Auth
            auth::dto::SignInRequest,
            auth::dto::JwtResponse,
            auth::dto::SignupRequest,
            auth::dto::DeliverySignupRequest,
            auth::dto::MessageResponse,
            auth::dto::DeliveryAccountDto,
            // Health
            health::handlers::HealthResponse,
            health::handlers::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Sign-in (JWT), account registration, profile lookup, delivery file upload"),
    ),
    info(
        title = "Wings User Service API",
        version = "1.0.0",
        description = "REST API for account registration, authentication and delivery profiles",
        license(name = "MIT"),
        contact(name = "Wings", email = "support@wings.tn")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(db: DatabaseConnection, jwt_config: JwtConfig) -> Router {
    let repo = Arc::new(AccountRepository::new(db.clone()));
    let identity = Arc::new(IdentityService::new(repo, jwt_config.clone()));

    let auth_handler_state = auth::handlers::AuthHandlerState { identity };
    let middleware_state = AuthState { jwt_config };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/signin", post(auth::handlers::signin))
        .route("/user-signup", post(auth::handlers::user_signup))
        .route("/delivery-signup", post(auth::handlers::delivery_signup))
        .with_state(auth_handler_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/GetUserId/{email}", get(auth::handlers::get_account_id))
        .route("/UpdateImage/{id}", put(auth::handlers::update_image))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(auth_handler_state);

    // Health routes
    let health_state = health::handlers::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };
    let health_routes = Router::new()
        .route("/health", get(health::handlers::health_check))
        .with_state(health_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .merge(health_routes)
        // Auth
        .nest("/api/auth", auth_routes)
        .nest("/api/auth", auth_protected_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;
    use serde_json::json;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::seed::seed_roles;
    use crate::interfaces::http::modules::auth::dto::JwtResponse;

    fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "wings-user-service".to_string(),
        }
    }

    async fn test_router() -> Router {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        seed_roles(&db).await.unwrap();
        create_api_router(db, test_jwt_config())
    }

    async fn send(router: &mut Router, req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = router.clone().into_service();
        svc.call(req).await.unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn user_signup_body(email: &str) -> serde_json::Value {
        json!({
            "first_name": "Amine",
            "last_name": "Ben Salah",
            "email": email,
            "governorate": "Tunis",
            "address": "12 Rue de la Liberté",
            "password": "s3cret-pass",
            "phone": "21612345"
        })
    }

    fn delivery_signup_body(email: &str) -> serde_json::Value {
        json!({
            "first_name": "Sami",
            "last_name": "Trabelsi",
            "email": email,
            "governorate": "Sfax",
            "address": "5 Avenue Habib Bourguiba",
            "password": "s3cret-pass",
            "phone": "21698765",
            "role": ["delivery"],
            "cin": "12345678",
            "account_holder": "Sami Trabelsi",
            "bank_name": "BIAT",
            "agency_name": "Agence Lac",
            "agency_city": "Tunis",
            "rib": "08 006 0123456789"
        })
    }

    async fn signin(router: &mut Router, email: &str, password: &str) -> JwtResponse {
        let resp = send(
            router,
            json_request(
                "POST",
                "/api/auth/signin",
                json!({"email": email, "password": password}),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        serde_json::from_value(body_json(resp).await).unwrap()
    }

    fn multipart_upload(uri: &str, token: &str, file_name: &str, payload: &str) -> Request<Body> {
        let boundary = "test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: image/png\r\n\r\n\
             {payload}\r\n\
             --{boundary}--\r\n"
        );

        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn signup_then_signin_returns_token_with_roles() {
        let mut router = test_router().await;

        let resp = send(
            &mut router,
            json_request(
                "POST",
                "/api/auth/user-signup",
                user_signup_body("amine@example.com"),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "User registered successfully!");

        let jwt = signin(&mut router, "amine@example.com", "s3cret-pass").await;
        assert_eq!(jwt.token_type, "Bearer");
        assert_eq!(jwt.email, "amine@example.com");
        assert_eq!(jwt.roles, vec!["ROLE_USER"]);
        assert!(!jwt.token.is_empty());
    }

    #[tokio::test]
    async fn duplicate_signup_returns_409() {
        let mut router = test_router().await;

        let first = send(
            &mut router,
            json_request(
                "POST",
                "/api/auth/user-signup",
                user_signup_body("dup@example.com"),
            ),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = send(
            &mut router,
            json_request(
                "POST",
                "/api/auth/user-signup",
                user_signup_body("dup@example.com"),
            ),
        )
        .await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn signin_with_wrong_password_returns_401() {
        let mut router = test_router().await;

        send(
            &mut router,
            json_request(
                "POST",
                "/api/auth/user-signup",
                user_signup_body("auth@example.com"),
            ),
        )
        .await;

        let resp = send(
            &mut router,
            json_request(
                "POST",
                "/api/auth/signin",
                json!({"email": "auth@example.com", "password": "wrong-pass"}),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = send(
            &mut router,
            json_request(
                "POST",
                "/api/auth/signin",
                json!({"email": "ghost@example.com", "password": "wrong-pass"}),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn signup_with_invalid_email_returns_422() {
        let mut router = test_router().await;

        let resp = send(
            &mut router,
            json_request(
                "POST",
                "/api/auth/user-signup",
                user_signup_body("not-an-email"),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn account_id_lookup_requires_bearer_token() {
        let mut router = test_router().await;

        send(
            &mut router,
            json_request(
                "POST",
                "/api/auth/user-signup",
                user_signup_body("lookup@example.com"),
            ),
        )
        .await;

        let unauthenticated = send(
            &mut router,
            Request::builder()
                .method("GET")
                .uri("/api/auth/GetUserId/lookup@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

        let jwt = signin(&mut router, "lookup@example.com", "s3cret-pass").await;
        let authenticated = send(
            &mut router,
            Request::builder()
                .method("GET")
                .uri("/api/auth/GetUserId/lookup@example.com")
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt.token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(authenticated.status(), StatusCode::OK);

        let body = body_json(authenticated).await;
        assert_eq!(body["data"], jwt.id);

        let missing = send(
            &mut router,
            Request::builder()
                .method("GET")
                .uri("/api/auth/GetUserId/ghost@example.com")
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt.token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn image_upload_overwrites_previous_file() {
        let mut router = test_router().await;

        let resp = send(
            &mut router,
            json_request(
                "POST",
                "/api/auth/delivery-signup",
                delivery_signup_body("courier@example.com"),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let jwt = signin(&mut router, "courier@example.com", "s3cret-pass").await;
        assert_eq!(jwt.roles, vec!["ROLE_DELIVERY"]);
        let uri = format!("/api/auth/UpdateImage/{}", jwt.id);

        let first = send(
            &mut router,
            multipart_upload(&uri, &jwt.token, "first.png", "first-bytes"),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);
        let body = body_json(first).await;
        assert_eq!(body["data"]["file_name"], "first.png");

        let second = send(
            &mut router,
            multipart_upload(&uri, &jwt.token, "second.png", "second-payload"),
        )
        .await;
        assert_eq!(second.status(), StatusCode::OK);
        let body = body_json(second).await;
        assert_eq!(body["data"]["file_name"], "second.png");
        assert_eq!(
            body["data"]["file_size"],
            "second-payload".len() as u64
        );

        let missing = send(
            &mut router,
            multipart_upload(
                "/api/auth/UpdateImage/no-such-id",
                &jwt.token,
                "photo.png",
                "bytes",
            ),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let mut router = test_router().await;

        let resp = send(
            &mut router,
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "ok");
    }
}
