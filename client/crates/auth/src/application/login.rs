//! Login Use Case
//!
//! Exchanges email/password for a token pair and stores the session.

use kernel::error::api_error::ApiError;

use crate::application::pipeline::{RequestOptions, RequestPipeline};
use crate::domain::entity::{session::Session, user::UserProfile};
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{email::Email, token_pair::TokenPair};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pipeline: RequestPipeline<S>,
}

impl<S> LoginUseCase<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub fn new(pipeline: RequestPipeline<S>) -> Self {
        Self { pipeline }
    }

    /// Sign in and return the fresh profile
    ///
    /// The login endpoint is form-encoded (`username`, `password`) and is
    /// never sent a bearer credential.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<UserProfile> {
        let email = Email::new(input.email)?;
        if input.password.is_empty() {
            return Err(AuthError::InvalidInput("Password cannot be empty".into()));
        }

        let config = self.pipeline.auth_config();
        let options = RequestOptions::post(config.login_endpoint.as_str()).form([
            ("username", email.as_str()),
            ("password", input.password.as_str()),
        ]);

        let pair: TokenPair = self
            .pipeline
            .send_as(&options)
            .await
            .map_err(classify_login_error)?;

        self.pipeline
            .store()
            .save(&Session::from_token_pair(pair))
            .await?;

        let profile: UserProfile = self.pipeline.get(&config.me_endpoint).await?;

        tracing::info!(user_id = %profile.id, "User signed in");
        Ok(profile)
    }
}

/// Backend rejections become `InvalidCredentials`; everything else passes through
fn classify_login_error(err: ApiError) -> AuthError {
    if err.is_client_error() {
        AuthError::InvalidCredentials(err.message().to_string())
    } else {
        AuthError::Api(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_login_error() {
        let err = classify_login_error(ApiError::new(400, "Incorrect email or password"));
        assert!(matches!(err, AuthError::InvalidCredentials(ref m) if m == "Incorrect email or password"));

        let err = classify_login_error(ApiError::network("Could not connect to server"));
        assert!(err.is_network());
    }
}
