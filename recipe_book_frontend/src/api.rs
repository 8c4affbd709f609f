use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http;
use recipe_book_model::{AccessToken, AuthResponse, Recipe, RecipeId, ValidCredentials, ValidRecipe};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::AuthMode;
use crate::config::ApiConfig;
use crate::session::Session;

pub const LIST_PATH: &str = "/v1/recipe/list";
pub const CREATE_PATH: &str = "/v1/recipe/create";

pub fn recipe_path(id: &RecipeId) -> String {
    format!("/v1/recipe/{id}")
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to do some HTTP: {0}")]
    Request(#[from] gloo_net::Error),
    #[error("Failed to do some JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Bad response: {status} - {body}")]
    Http { status: u16, body: String },
    #[error("Server answered with an empty access token")]
    EmptyToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
    pub bearer: Option<AccessToken>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>, session: &Session) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            body: None,
            bearer: session.token().cloned(),
        }
    }

    fn json<B: Serialize>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: body.into(),
        }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn http_err(self) -> Error {
        Error::Http {
            status: self.status,
            body: self.body,
        }
    }

    fn http_ok(self) -> Result<Self, Error> {
        if self.ok() {
            Ok(self)
        } else {
            Err(self.http_err())
        }
    }

    fn http_status(self, status: u16) -> Result<Self, Error> {
        if self.status == status {
            Ok(self)
        } else {
            Err(self.http_err())
        }
    }

    fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Sends a request to the recipe service and hands back whatever it answered.
/// Status codes are interpreted by [`ApiClient`], not here.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Rc<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        (**self).send(request).await
    }
}

/// Browser fetch through gloo-net.
#[derive(Debug, Clone)]
pub struct GlooTransport {
    config: ApiConfig,
}

impl GlooTransport {
    pub fn new(config: ApiConfig) -> Self {
        GlooTransport { config }
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let url = self.config.endpoint(&request.path);
        let mut builder = match request.method {
            Method::Get => http::Request::get(&url),
            Method::Post => http::Request::post(&url),
            Method::Put => http::Request::put(&url),
            Method::Delete => http::Request::delete(&url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token.as_str()));
        }
        let resp = match request.body {
            Some(body) => {
                builder
                    .header("Content-Type", "application/json")
                    .body(body)?
                    .send()
                    .await?
            }
            None => builder.send().await?,
        };
        let status = resp.status();
        let body = resp.text().await?;
        Ok(ApiResponse { status, body })
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        ApiClient { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<Recipe>, Error> {
        let request = ApiRequest::new(Method::Get, LIST_PATH, session);
        self.transport.send(request).await?.http_ok()?.json()
    }

    pub async fn create(&self, session: &Session, recipe: &ValidRecipe) -> Result<(), Error> {
        let request = ApiRequest::new(Method::Post, CREATE_PATH, session).json(recipe)?;
        self.transport.send(request).await?.http_ok()?;
        Ok(())
    }

    pub async fn update(
        &self,
        session: &Session,
        id: &RecipeId,
        recipe: &ValidRecipe,
    ) -> Result<(), Error> {
        let request = ApiRequest::new(Method::Put, recipe_path(id), session).json(recipe)?;
        self.transport.send(request).await?.http_ok()?;
        Ok(())
    }

    pub async fn delete(&self, session: &Session, id: &RecipeId) -> Result<(), Error> {
        let request = ApiRequest::new(Method::Delete, recipe_path(id), session);
        self.transport.send(request).await?.http_ok()?;
        Ok(())
    }

    /// Logs in or registers depending on `mode`. Only the exact success
    /// status of the mode yields a token.
    pub async fn sign_in(
        &self,
        mode: AuthMode,
        credentials: &ValidCredentials,
    ) -> Result<AccessToken, Error> {
        let request = ApiRequest::new(Method::Post, mode.path(), &Session::anonymous())
            .json(credentials)?;
        let AuthResponse { token } = self
            .transport
            .send(request)
            .await?
            .http_status(mode.success_status())?
            .json::<AuthResponse>()?;
        if token.access_token.as_str().is_empty() {
            return Err(Error::EmptyToken);
        }
        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::RecordingTransport;
    use futures::executor::block_on;
    use recipe_book_model::{Credentials, RecipeInput};
    use serde_json::json;

    fn pizza() -> ValidRecipe {
        RecipeInput {
            name: "Pizza".into(),
            img: "https://x/y.jpg".into(),
            desc: "desc".into(),
        }
        .validate()
        .unwrap()
    }

    fn credentials() -> ValidCredentials {
        Credentials {
            email: "a@b.com".into(),
            password: "pw".into(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn list_decodes_recipes_and_sends_bearer() {
        let transport = RecordingTransport::new(|_| {
            Ok(ApiResponse::new(
                200,
                json!([{"id": 1, "img": "https://x/y.jpg", "name": "Pizza", "desc": "desc"}])
                    .to_string(),
            ))
        });
        let api = ApiClient::new(transport.clone());
        let session = Session::signed_in(AccessToken::new("T"));

        let recipes = block_on(api.list(&session)).unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Pizza");
        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].path, LIST_PATH);
        assert_eq!(sent[0].bearer, Some(AccessToken::new("T")));
        assert_eq!(sent[0].body, None);
    }

    #[test]
    fn create_posts_exact_body() {
        let transport = RecordingTransport::new(|_| Ok(ApiResponse::new(201, "{}")));
        let api = ApiClient::new(transport.clone());

        block_on(api.create(&Session::anonymous(), &pizza())).unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].path, CREATE_PATH);
        assert_eq!(sent[0].bearer, None);
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"name": "Pizza", "img": "https://x/y.jpg", "desc": "desc"})
        );
    }

    #[test]
    fn non_success_status_is_an_error_even_with_a_body() {
        let transport = RecordingTransport::new(|_| {
            Ok(ApiResponse::new(409, r#"{"message":"duplicate name"}"#))
        });
        let api = ApiClient::new(transport);

        let err = block_on(api.create(&Session::anonymous(), &pizza())).unwrap_err();

        assert!(matches!(err, Error::Http { status: 409, .. }));
    }

    #[test]
    fn update_and_delete_target_the_item_path() {
        let transport = RecordingTransport::new(|_| Ok(ApiResponse::new(200, "")));
        let api = ApiClient::new(transport.clone());
        let id = RecipeId::from(5);

        block_on(api.update(&Session::anonymous(), &id, &pizza())).unwrap();
        block_on(api.delete(&Session::anonymous(), &id)).unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Put);
        assert_eq!(sent[0].path, "/v1/recipe/5");
        assert_eq!(sent[1].method, Method::Delete);
        assert_eq!(sent[1].path, "/v1/recipe/5");
    }

    #[test]
    fn login_accepts_only_200() {
        let transport = RecordingTransport::new(|request| {
            assert_eq!(request.path, "/v1/auth/login");
            Ok(ApiResponse::new(200, r#"{"token":{"accessToken":"T"}}"#))
        });
        let api = ApiClient::new(transport.clone());

        let token = block_on(api.sign_in(AuthMode::Login, &credentials())).unwrap();

        assert_eq!(token, AccessToken::new("T"));
        let body: serde_json::Value =
            serde_json::from_str(transport.requests()[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(body, json!({"email": "a@b.com", "password": "pw"}));
    }

    #[test]
    fn register_rejects_200() {
        let transport = RecordingTransport::new(|_| {
            Ok(ApiResponse::new(200, r#"{"token":{"accessToken":"T"}}"#))
        });
        let api = ApiClient::new(transport.clone());

        let err = block_on(api.sign_in(AuthMode::Register, &credentials())).unwrap_err();

        assert!(matches!(err, Error::Http { status: 200, .. }));
        assert_eq!(transport.requests()[0].path, "/v1/auth/register");
    }

    #[test]
    fn empty_access_token_is_rejected() {
        let transport = RecordingTransport::new(|_| {
            Ok(ApiResponse::new(200, r#"{"token":{"accessToken":""}}"#))
        });
        let api = ApiClient::new(transport);

        let err = block_on(api.sign_in(AuthMode::Login, &credentials())).unwrap_err();

        assert!(matches!(err, Error::EmptyToken));
    }

    #[test]
    fn transport_failures_propagate() {
        let transport = RecordingTransport::new(|_| {
            Err(Error::Request(gloo_net::Error::GlooError("offline".into())))
        });
        let api = ApiClient::new(transport);

        assert!(matches!(
            block_on(api.list(&Session::anonymous())),
            Err(Error::Request(_))
        ));
    }
}
