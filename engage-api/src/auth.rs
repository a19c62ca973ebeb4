//! Authentication endpoints

use log::info;
use log::warn;

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::AuthResponse;
use crate::model::LoginRequest;
use crate::model::MessageResponse;
use crate::model::RegisterRequest;
use crate::model::User;

/// Account calls against the backend. Each method is a single request;
/// `login` and `logout` also update the token store.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Whether a token is currently stored.
    pub async fn is_authenticated(&self) -> Result<bool, Error> {
        Ok(self.client.tokens().get().await?.is_some())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, Error> {
        self.client.post("/register", request).await
    }

    /// Logs in and persists the returned token.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, Error> {
        let response: AuthResponse = self.client.post("/login", request).await?;
        self.client.tokens().set(&response.token).await?;
        info!("logged in as {}", response.user.email);
        Ok(response)
    }

    /// Logs out. The stored token is cleared even if the request fails;
    /// the request error is still returned.
    pub async fn logout(&self) -> Result<(), Error> {
        let result = self.client.post_empty("/logout").await;
        if let Err(e) = &result {
            warn!("logout request failed: {e}");
        }
        self.client.tokens().clear().await?;
        info!("logged out");
        result
    }

    pub async fn current_user(&self) -> Result<User, Error> {
        self.client.get("/user").await
    }

    pub async fn send_verification_email(&self) -> Result<MessageResponse, Error> {
        self.client
            .post("/email/verification-notification", &serde_json::json!({}))
            .await
    }

    pub async fn verify_email(&self, id: u64, hash: &str) -> Result<MessageResponse, Error> {
        self.client.get(&format!("/email/verify/{id}/{hash}")).await
    }
}
