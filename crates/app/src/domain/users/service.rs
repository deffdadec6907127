//! Users service.

use async_trait::async_trait;
use mockall::automock;
use serde::Deserialize;

use boxoffice::users::{Credentials, NewUser, Session, User, UserId, UserUpdate};

use crate::api::{ApiClient, ApiError};

/// Body returned by a successful login.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: User,
    #[serde(alias = "accessToken")]
    access: String,
    #[serde(default, alias = "refreshToken")]
    refresh: Option<String>,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            user: response.user,
            access_token: response.access,
            refresh_token: response.refresh,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpUsersService {
    client: ApiClient,
}

impl HttpUsersService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UsersService for HttpUsersService {
    #[tracing::instrument(
        name = "users.service.login",
        skip(self, credentials),
        fields(username = %credentials.username),
        err
    )]
    async fn login(&self, credentials: Credentials) -> Result<Session, ApiError> {
        let response: LoginResponse = self
            .client
            .post("/users/login/", &credentials, None)
            .await?;

        Ok(response.into())
    }

    #[tracing::instrument(
        name = "users.service.register",
        skip(self, user),
        fields(username = %user.username),
        err
    )]
    async fn register(&self, user: NewUser) -> Result<User, ApiError> {
        self.client.post("/users/register/", &user, None).await
    }

    #[tracing::instrument(name = "users.service.list_users", skip_all, err)]
    async fn list_users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        self.client.get("/users/", Some(token)).await
    }

    #[tracing::instrument(name = "users.service.get_user", skip(self, token), fields(user = %id), err)]
    async fn get_user(&self, token: &str, id: UserId) -> Result<User, ApiError> {
        self.client.get(&format!("/users/{id}/"), Some(token)).await
    }

    #[tracing::instrument(name = "users.service.update_me", skip_all, err)]
    async fn update_me(&self, token: &str, update: UserUpdate) -> Result<User, ApiError> {
        self.client.put("/users/me/", &update, Some(token)).await
    }

    #[tracing::instrument(name = "users.service.delete_me", skip_all, err)]
    async fn delete_me(&self, token: &str) -> Result<(), ApiError> {
        self.client.delete("/users/me/", Some(token)).await
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Exchanges credentials for a session.
    async fn login(&self, credentials: Credentials) -> Result<Session, ApiError>;

    /// Creates an account.
    async fn register(&self, user: NewUser) -> Result<User, ApiError>;

    /// Lists every user.
    async fn list_users(&self, token: &str) -> Result<Vec<User>, ApiError>;

    /// Retrieve a single user.
    async fn get_user(&self, token: &str, id: UserId) -> Result<User, ApiError>;

    /// Updates the profile of the token's owner.
    async fn update_me(&self, token: &str, update: UserUpdate) -> Result<User, ApiError>;

    /// Deletes the account of the token's owner.
    async fn delete_me(&self, token: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    use boxoffice::users::Role;

    use crate::test::TestContext;

    use super::*;

    fn user_json() -> serde_json::Value {
        json!({
            "id": 3,
            "username": "ana",
            "email": "ana@example.com",
            "cpf": "12345678901",
            "name": "Ana Lima",
            "role": "user"
        })
    }

    #[tokio::test]
    async fn login_returns_session_with_tokens() -> TestResult {
        let ctx = TestContext::new().await;

        Mock::given(method("POST"))
            .and(path("/users/login/"))
            .and(body_json(json!({ "username": "ana", "password": "secret1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": user_json(),
                "access": "access-token",
                "refresh": "refresh-token"
            })))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let session = HttpUsersService::new(ctx.client)
            .login(Credentials {
                username: "ana".to_string(),
                password: "secret1".to_string(),
            })
            .await?;

        assert_eq!(session.user_id(), UserId::new(3));
        assert_eq!(session.access_token, "access-token");
        assert_eq!(session.refresh_token.as_deref(), Some("refresh-token"));

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let ctx = TestContext::new().await;

        Mock::given(method("POST"))
            .and(path("/users/login/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&ctx.server)
            .await;

        let result = HttpUsersService::new(ctx.client)
            .login(Credentials {
                username: "ana".to_string(),
                password: "wrong-pass".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(ApiError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );
    }

    #[tokio::test]
    async fn register_sends_role() -> TestResult {
        let ctx = TestContext::new().await;

        Mock::given(method("POST"))
            .and(path("/users/register/"))
            .and(body_json(json!({
                "name": "Ana Lima",
                "username": "ana",
                "email": "ana@example.com",
                "password": "secret1",
                "cpf": "12345678901",
                "role": "organizer"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let user = HttpUsersService::new(ctx.client)
            .register(NewUser {
                name: "Ana Lima".to_string(),
                username: "ana".to_string(),
                email: "ana@example.com".to_string(),
                password: "secret1".to_string(),
                cpf: "12345678901".to_string(),
                role: Role::Organizer,
            })
            .await?;

        assert_eq!(user.username, "ana");

        Ok(())
    }

    #[tokio::test]
    async fn profile_updates_use_bearer_token() -> TestResult {
        let ctx = TestContext::new().await;

        Mock::given(method("PUT"))
            .and(path("/users/me/"))
            .and(header("Authorization", "Bearer access-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .expect(1)
            .mount(&ctx.server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/users/me/"))
            .and(header("Authorization", "Bearer access-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let service = HttpUsersService::new(ctx.client);

        service
            .update_me(
                "access-token",
                UserUpdate {
                    name: "Ana Lima".to_string(),
                    username: "ana".to_string(),
                    email: "ana@example.com".to_string(),
                    cpf: "12345678901".to_string(),
                    role: Role::User,
                },
            )
            .await?;
        service.delete_me("access-token").await?;

        Ok(())
    }
}
