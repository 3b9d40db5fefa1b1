//! Authentication: credential storage, session state, login/logout, user profile.
//!
//! ## Token Model
//!
//! - Login/register return an access token (and usually a refresh token). Both
//!   go into the client's [`TokenStore`]; the access token is sent as
//!   `Authorization: Bearer <token>`.
//! - When a request comes back `401`, the HTTP layer refreshes once via
//!   `POST /api/v1/auth/refresh` and retries. If that fails the tokens are
//!   cleared and the [`SessionStore`] emits [`SessionEvent::Expired`].
//! - **Logout** always clears local tokens and session state, even when the
//!   server call fails.

pub mod client;
pub mod session;
pub mod token;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use session::{SessionEvent, SessionStore, SubscriptionId};
pub use token::{MemoryTokenStore, TokenStore};

// ============================================================================
// User profile types
// ============================================================================

/// The signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, alias = "displayName")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial update applied to the session's user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub email_verified: Option<bool>,
    pub onboarding_completed: Option<bool>,
}

impl UserUpdate {
    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(name) = self.display_name {
            user.display_name = Some(name);
        }
        if let Some(v) = self.email_verified {
            user.email_verified = v;
        }
        if let Some(v) = self.onboarding_completed {
            user.onboarding_completed = v;
        }
    }
}

/// Third-party sign-in providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Apple,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Apple => "apple",
        }
    }
}

impl std::fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Login/register response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    #[serde(alias = "accessToken")]
    pub access_token: String,
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Refresh response. Cookie-based deployments send only the access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshResponse {
    #[serde(alias = "accessToken")]
    pub access_token: String,
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}
