//! Auth sub-client: register, login, logout, session restore, password reset.

use crate::auth::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, OAuthProvider, RegisterRequest,
    ResetPasswordRequest, User,
};
use crate::client::TradeJournalClient;
use crate::error::SdkError;
use crate::http::RequestOptions;
use crate::network::API_PREFIX;
use crate::shared::validation::{validate_email, validate_password, validate_required};
use crate::shared::ValidationError;

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a TradeJournalClient,
}

impl<'a> Auth<'a> {
    /// Create an account and sign in.
    ///
    /// Email and password are checked locally before any request is made.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, SdkError> {
        check_credentials(&request.email, &request.password)?;
        validate_password(&request.password)?;

        let resp: AuthResponse = self
            .client
            .http
            .post("/auth/register", request, &RequestOptions::public())
            .await?;
        Ok(self.start_session(resp))
    }

    /// Sign in with email and password.
    pub async fn login(&self, request: &LoginRequest) -> Result<User, SdkError> {
        check_credentials(&request.email, &request.password)?;

        let resp: AuthResponse = self
            .client
            .http
            .post("/auth/login", request, &RequestOptions::public())
            .await?;
        Ok(self.start_session(resp))
    }

    /// Sign out. Local tokens and session state are cleared even when the
    /// server call fails; that failure is still returned.
    pub async fn logout(&self) -> Result<(), SdkError> {
        let result = self
            .client
            .http
            .post_empty("/auth/logout", &serde_json::json!({}), &RequestOptions::default())
            .await;

        self.client.http.tokens().clear();
        self.client.http.session().logout();

        if let Err(e) = &result {
            tracing::debug!(status = e.status, "Server logout failed; local session cleared");
        }
        Ok(result?)
    }

    /// Fetch the signed-in user and store it in the session.
    pub async fn me(&self) -> Result<User, SdkError> {
        let user: User = self
            .client
            .http
            .get("/auth/me", &RequestOptions::default())
            .await?;
        self.client.http.session().set_user(Some(user.clone()));
        Ok(user)
    }

    /// Rebuild session state on startup from a persisted token.
    ///
    /// Returns `None` without a request when no token is stored. If the token
    /// is rejected and cannot be refreshed, the tokens are cleared and `None`
    /// is returned. Other failures are propagated. The session's loading flag
    /// is cleared in every case.
    pub async fn restore(&self) -> Result<Option<User>, SdkError> {
        let session = self.client.http.session();
        if !self.client.http.tokens().has_access_token() {
            session.set_user(None);
            session.set_loading(false);
            return Ok(None);
        }

        let result = self.me().await;
        session.set_loading(false);
        match result {
            Ok(user) => Ok(Some(user)),
            Err(SdkError::Api(e)) if e.status == 401 => {
                self.client.http.tokens().clear();
                session.set_user(None);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Exchange the refresh credential for a new access token now.
    ///
    /// Shares any refresh already triggered by a `401` elsewhere.
    pub async fn refresh(&self) -> Result<(), SdkError> {
        Ok(self.client.http.refresh_session().await?)
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), SdkError> {
        if !validate_email(email) {
            return Err(ValidationError::new("Please enter a valid email address").into());
        }
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.client
            .http
            .post_empty("/auth/forgot-password", &request, &RequestOptions::public())
            .await?;
        Ok(())
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), SdkError> {
        validate_required(Some(token), "Reset token")?;
        validate_password(new_password)?;
        let request = ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        self.client
            .http
            .post_empty("/auth/reset-password", &request, &RequestOptions::public())
            .await?;
        Ok(())
    }

    /// Browser URL that starts the provider's sign-in flow.
    pub fn oauth_url(&self, provider: OAuthProvider) -> String {
        format!(
            "{}{}/auth/{}",
            self.client.http.base_url(),
            API_PREFIX,
            provider
        )
    }

    /// Whether an access token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.client.http.tokens().has_access_token()
    }

    fn start_session(&self, resp: AuthResponse) -> User {
        self.client
            .http
            .tokens()
            .set_tokens(resp.access_token, resp.refresh_token);
        self.client.http.session().login(resp.user.clone());
        tracing::info!(user_id = %resp.user.id, "Signed in");
        resp.user
    }
}

fn check_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    validate_required(Some(email), "Email")?;
    if !validate_email(email) {
        return Err(ValidationError::new("Please enter a valid email address"));
    }
    validate_required(Some(password), "Password")
}
