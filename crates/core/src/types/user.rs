//! User, credential and token DTOs.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;
use super::status::UserRole;

/// Address and other personal details embedded in a user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

/// The authenticated user's profile as returned by `/users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive_info: Option<SensitiveInfo>,
    pub role: UserRole,
}

impl User {
    /// "Name Surname", for greetings.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Registration payload.
#[derive(Clone, Serialize, Deserialize)]
pub struct UserRegister {
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: Email,
    pub password: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive_info: Option<SensitiveInfo>,
}

impl std::fmt::Debug for UserRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRegister")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone_number", &self.phone_number)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Login payload.
#[derive(Clone, Serialize, Deserialize)]
pub struct UserLogin {
    pub email: Email,
    pub password: String,
}

impl UserLogin {
    /// Build a login payload.
    #[must_use]
    pub const fn new(email: Email, password: String) -> Self {
        Self { email, password }
    }
}

impl std::fmt::Debug for UserLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserLogin")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Change-password payload.
#[derive(Clone, Serialize, Deserialize)]
pub struct ChangePassword {
    pub password: String,
    pub new_password: String,
}

impl ChangePassword {
    #[must_use]
    pub const fn new(password: String, new_password: String) -> Self {
        Self {
            password,
            new_password,
        }
    }
}

impl std::fmt::Debug for ChangePassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangePassword { .. }")
    }
}

/// Access/refresh token pair returned by `/auth/login`.
///
/// Both tokens are opaque to the client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}
