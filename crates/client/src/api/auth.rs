//! Registration, login and account endpoints.

use serde::Serialize;
use shopfront_core::{ChangePassword, TokenPair, User, UserLogin, UserRegister};
use tracing::instrument;

use crate::error::ApiError;
use crate::http::HttpClient;

#[derive(Serialize)]
struct VerifyEmail<'a> {
    token: &'a str,
}

/// Authentication endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    http: &'a HttpClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Create an account. The backend sends a verification mail.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip_all, fields(email = %data.email))]
    pub async fn register(&self, data: &UserRegister) -> Result<User, ApiError> {
        self.http.post("/auth/register", data).await
    }

    /// Exchange credentials for a token pair.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip_all, fields(email = %data.email))]
    pub async fn login(&self, data: &UserLogin) -> Result<TokenPair, ApiError> {
        self.http.post("/auth/login", data).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.http.get_discard("/auth/logout").await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip_all)]
    pub async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        self.http
            .post_discard("/auth/verify-email", &VerifyEmail { token })
            .await
    }

    /// Profile of the user the stored access token belongs to.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip_all)]
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.http.get("/users/me").await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip_all)]
    pub async fn change_password(&self, data: &ChangePassword) -> Result<(), ApiError> {
        self.http.post_discard("/auth/change_password", data).await
    }
}
