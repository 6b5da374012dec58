//! Register Use Case
//!
//! Creates an account, then signs in with the same credentials.

use serde::Serialize;

use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::pipeline::RequestPipeline;
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    email: &'a Email,
    password: &'a str,
    full_name: Option<&'a str>,
}

/// Register use case
pub struct RegisterUseCase<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pipeline: RequestPipeline<S>,
    login: LoginUseCase<S>,
}

impl<S> RegisterUseCase<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub fn new(pipeline: RequestPipeline<S>) -> Self {
        Self {
            login: LoginUseCase::new(pipeline.clone()),
            pipeline,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<UserProfile> {
        let email = Email::new(input.email)?;
        if input.password.is_empty() {
            return Err(AuthError::InvalidInput("Password cannot be empty".into()));
        }
        let full_name = input
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let body = RegisterBody {
            email: &email,
            password: &input.password,
            full_name,
        };
        let created: UserProfile = self
            .pipeline
            .post_json(&self.pipeline.auth_config().register_endpoint, &body)
            .await?;

        tracing::info!(user_id = %created.id, "User registered");

        self.login
            .execute(LoginInput {
                email: email.as_str().to_string(),
                password: input.password,
            })
            .await
    }
}
