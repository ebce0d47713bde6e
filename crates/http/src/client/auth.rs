//! Login

use super::{PublicClient, error::ClientError};
use crate::types::{LoginRequest, LoginResponse};
use reqwest::Method;

impl PublicClient {
    /// Exchange operator credentials for a token.
    ///
    /// The token is returned as issued; hand it to the session store to
    /// decode and persist it.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let request = self.request(Method::POST, "/auth").json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        });
        let response: LoginResponse = self.execute(request).await?;
        tracing::info!("Operator logged in");
        Ok(response.token)
    }
}
