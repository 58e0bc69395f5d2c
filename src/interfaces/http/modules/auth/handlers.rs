//! Authentication API handlers

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    DeliveryAccountDto, DeliverySignupRequest, JwtResponse, MessageResponse, SignInRequest,
    SignupRequest,
};
use crate::application::identity::IdentityService;
use crate::domain::{DomainError, StoredFile};
use crate::infrastructure::database::repositories::AccountRepository;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

/// Auth handler state — concrete over `AccountRepository` for Axum
/// compatibility.
#[derive(Clone)]
pub struct AuthHandlerState {
    pub identity: Arc<IdentityService<AccountRepository>>,
}

fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::DuplicateEmail(_) => StatusCode::CONFLICT,
        DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::RoleConfig(_) | DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/signin",
    tag = "Authentication",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Successful sign-in", body = JwtResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn signin(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<SignInRequest>,
) -> Result<Json<JwtResponse>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .identity
        .authenticate(&request.email, &request.password)
        .await
    {
        Ok(auth) => Ok(Json(JwtResponse {
            token: auth.token,
            token_type: auth.token_type,
            expires_in: auth.expires_in,
            id: auth.account.id,
            first_name: auth.account.first_name,
            last_name: auth.account.last_name,
            email: auth.account.email,
            roles: auth.roles.iter().map(|r| r.as_str().to_string()).collect(),
        })),
        Err(e) => Err((status_for(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/user-signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account registered", body = MessageResponse),
        (status = 409, description = "Email already in use"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn user_signup(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.identity.register_standard(request.into()).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "User registered successfully!".to_string(),
        })),
        Err(e) => Err((status_for(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/delivery-signup",
    tag = "Authentication",
    request_body = DeliverySignupRequest,
    responses(
        (status = 200, description = "Delivery account registered", body = MessageResponse),
        (status = 409, description = "Email already in use"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn delivery_signup(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<DeliverySignupRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ApiResponse<()>>)> {
    let (registration, details) = request.into_parts();

    match state.identity.register_delivery(registration, details).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "User registered successfully!".to_string(),
        })),
        Err(e) => Err((status_for(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/GetUserId/{email}",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "Account id", body = ApiResponse<String>),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No account with that email")
    )
)]
pub async fn get_account_id(
    State(state): State<AuthHandlerState>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<String>>)> {
    match state.identity.account_id_by_email(&email).await {
        Ok(id) => Ok(Json(ApiResponse::success(id))),
        Err(e) => Err((status_for(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

/// Strip any path components a client may have smuggled into the file name.
fn clean_file_name(raw: &str) -> String {
    raw.rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("upload")
        .to_string()
}

#[utoipa::path(
    put,
    path = "/api/auth/UpdateImage/{id}",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Delivery account id")),
    responses(
        (status = 200, description = "Updated delivery record", body = ApiResponse<DeliveryAccountDto>),
        (status = 400, description = "Missing file part"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Delivery account not found")
    )
)]
pub async fn update_image(
    State(state): State<AuthHandlerState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<DeliveryAccountDto>>, (StatusCode, Json<ApiResponse<DeliveryAccountDto>>)>
{
    let mut file: Option<StoredFile> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Invalid multipart body: {}", e))),
                ));
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let name = clean_file_name(field.file_name().unwrap_or("upload"));
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Failed to read file: {}", e))),
                ));
            }
        };

        file = Some(StoredFile {
            name,
            content_type,
            data,
        });
    }

    let Some(file) = file else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Missing 'file' part in multipart body")),
        ));
    };

    match state.identity.attach_file(&id, file).await {
        Ok(updated) => Ok(Json(ApiResponse::success(DeliveryAccountDto::from(updated)))),
        Err(e) => Err((status_for(&e), Json(ApiResponse::error(e.to_string())))),
    }
}
