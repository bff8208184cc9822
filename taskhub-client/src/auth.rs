//! Authentication endpoints

use async_trait::async_trait;
use reqwest::Method;
use taskhub_core::domain::AuthUser;
use taskhub_core::dto::auth::{AuthResponse, LoginRequest, SignupRequest};
use tracing::info;

use crate::TaskHubClient;
use crate::api::AuthApi;
use crate::error::Result;

#[async_trait]
impl AuthApi for TaskHubClient {
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        let response = self.request(Method::POST, "/auth/login").json(req).send().await?;
        let auth: AuthResponse = self.handle_response(response).await?;

        self.set_token(Some(auth.token.clone()));
        info!(user_id = %auth.user.id, role = %auth.user.role, "Logged in");
        Ok(auth)
    }

    async fn signup(&self, req: &SignupRequest) -> Result<AuthResponse> {
        let response = self.request(Method::POST, "/auth/signup").json(req).send().await?;
        let auth: AuthResponse = self.handle_response(response).await?;

        self.set_token(Some(auth.token.clone()));
        info!(user_id = %auth.user.id, "Signed up");
        Ok(auth)
    }

    async fn profile(&self) -> Result<AuthUser> {
        let response = self.request(Method::GET, "/auth/me").send().await?;
        self.handle_response(response).await
    }

    fn use_token(&self, token: Option<String>) {
        self.set_token(token);
    }
}
