use poem_openapi::{auth::Bearer, payload::Json, ApiResponse, OpenApi, SecurityScheme, Tags};
use std::sync::Arc;

use crate::errors::auth::AuthError;
use crate::services::{AccessControl, AuditLogger, TokenService};
use crate::stores::UserStore;
use crate::types::dto::auth::{LoginRequest, SignupRequest, TokenResponse};
use crate::types::dto::user::UserResponse;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Account and session endpoints
    Authentication,
}

/// Response for signup
#[derive(ApiResponse)]
pub enum SignupResponse {
    /// User created
    #[oai(status = 201)]
    Created(Json<UserResponse>),
}

/// Authentication API endpoints
pub struct AuthApi {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
    access_control: Arc<AccessControl>,
    audit: Arc<AuditLogger>,
}

impl AuthApi {
    pub fn new(
        user_store: Arc<UserStore>,
        token_service: Arc<TokenService>,
        access_control: Arc<AccessControl>,
        audit: Arc<AuditLogger>,
    ) -> Self {
        Self {
            user_store,
            token_service,
            access_control,
            audit,
        }
    }
}

#[OpenApi]
impl AuthApi {
    /// Create a new user account
    #[oai(path = "/signup", method = "post", tag = "AuthTags::Authentication")]
    pub async fn signup(&self, body: Json<SignupRequest>) -> Result<SignupResponse, AuthError> {
        let user = self.user_store.create_user(&body.0).await?;

        self.audit
            .log(user.id, "signup", format!("account '{}' created", user.username))
            .await;

        Ok(SignupResponse::Created(Json(UserResponse::from(user))))
    }

    /// Login with username and password to receive a session token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    pub async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let user = self
            .user_store
            .verify_login(&body.username, &body.password)
            .await?;

        let access_token = self.token_service.issue(user.id)?;

        self.audit.log(user.id, "login", "session opened".to_string()).await;

        Ok(Json(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        }))
    }

    /// Return the account the presented token belongs to
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    pub async fn me(&self, auth: BearerAuth) -> Result<Json<UserResponse>, AuthError> {
        let user = self.access_control.current_user(&auth.0.token).await?;

        Ok(Json(UserResponse::from(user)))
    }
}
