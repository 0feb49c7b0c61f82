use shared::{LoginRequest, LoginResponse, UserInfo};

use crate::ClientResult;
use crate::http::HttpClient;

// ========== Auth API ==========

impl HttpClient {
    /// Login with email and password; stores the token in the session
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.post("auth/login", &request).await?;
        self.session().set_login(response.token.clone(), response.user.clone());
        tracing::info!(user = %response.user.email, role = ?response.user.role, "Logged in");
        Ok(response)
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get("auth/me").await
    }

    /// Forget the local login. There is no server-side session to revoke.
    pub fn logout(&self) {
        self.session().clear();
    }
}
