//! HTTP client implementation

use std::time::Duration;

use cloudhub_models::Environment;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::DeployerError;

/// Header carrying the organization id of an application call
pub const ORG_ID_HEADER: &str = "X-ANYPNT-ORG-ID";

/// Header carrying the environment id of an application call
pub const ENV_ID_HEADER: &str = "X-ANYPNT-ENV-ID";

/// HTTP client for the Anypoint Platform API
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DeployerError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: &str,
        scope: Option<&Environment>,
    ) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, &url).bearer_auth(token);

        // Application calls are scoped to an organization and environment
        if let Some(scope) = scope {
            request = request
                .header(ORG_ID_HEADER, &scope.organization_id)
                .header(ENV_ID_HEADER, &scope.id);
        }

        request
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        scope: Option<&Environment>,
    ) -> Result<T, DeployerError> {
        let response = self.request(Method::GET, path, token, scope).send().await?;
        read_json("GET", response).await
    }

    /// Make a GET request, mapping `404 Not Found` to `None`
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        scope: Option<&Environment>,
    ) -> Result<Option<T>, DeployerError> {
        let response = self.request(Method::GET, path, token, scope).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("GET {} returned 404", path);
            return Ok(None);
        }

        read_json("GET", response).await.map(Some)
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: &str,
        scope: Option<&Environment>,
        body: &B,
    ) -> Result<T, DeployerError> {
        let response = self
            .request(Method::POST, path, token, scope)
            .json(body)
            .send()
            .await?;
        read_json("POST", response).await
    }

    /// Make a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: &str,
        scope: Option<&Environment>,
        body: &B,
    ) -> Result<T, DeployerError> {
        let response = self
            .request(Method::PUT, path, token, scope)
            .json(body)
            .send()
            .await?;
        read_json("PUT", response).await
    }

    /// Make an unauthenticated form POST, used to acquire a token
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, DeployerError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {} (form)", url);

        let response = self.client.post(&url).form(form).send().await?;
        read_json("POST", response).await
    }
}

async fn read_json<T: DeserializeOwned>(
    method: &str,
    response: Response,
) -> Result<T, DeployerError> {
    if !response.status().is_success() {
        return Err(remote_error(method, response).await);
    }

    let body = response.json().await?;
    Ok(body)
}

/// Build a [`DeployerError::RemoteError`] from a non-success response.
///
/// The platform reports failures as `{"message": "..."}`; anything else is
/// passed through verbatim.
async fn remote_error(method: &str, response: Response) -> DeployerError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .unwrap_or(body);

    error!("HTTP {} failed: {} - {}", method, status, message);
    DeployerError::RemoteError {
        status: status.as_u16(),
        message,
    }
}
