/// Blocking HTTP implementation of `PermissionsApi`.
use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use super::PermissionsApi;
use super::errors::ApiError;
use crate::types::{AccessControlRequest, ObjectType};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const API_PREFIX: [&str; 3] = ["api", "2.0", "permissions"];

/// Talks to `/api/2.0/permissions` on a workspace host.
pub struct HttpPermissionsClient {
    client: Client,
    base: Url,
    token: String,
}

impl std::fmt::Debug for HttpPermissionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPermissionsClient")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpPermissionsClient {
    /// Build a client for `host`. A host without a scheme is treated as `https://`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` for an unusable host and
    /// `ApiError::Client` if the TLS backend cannot be initialised.
    pub fn new(host: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = parse_host(host)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            client,
            base,
            token: token.to_owned(),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl {
                url: self.base.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &Url,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!(%method, %url, "permissions API request");
        let request = build(self.client.request(method.clone(), url.clone()))
            .bearer_auth(&self.token);
        let transport = |source| ApiError::Transport {
            url: url.to_string(),
            source,
        };

        let response = request.send().map_err(transport)?;
        let status = response.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "permissions API response");
        let body = response.text().map_err(transport)?;

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn parse_host(host: &str) -> Result<Url, ApiError> {
    let host = host.trim();
    let text = if host.contains("://") {
        host.to_owned()
    } else {
        format!("https://{host}")
    };
    let url = Url::parse(&text).map_err(|source| ApiError::InvalidUrl {
        url: host.to_owned(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl {
            url: host.to_owned(),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        });
    }
    Ok(url)
}

impl PermissionsApi for HttpPermissionsClient {
    fn get_permissions(
        &self,
        object_type: ObjectType,
        object_id: &str,
    ) -> Result<Value, ApiError> {
        let url = self.url(&[object_type.as_path(), object_id])?;
        self.send(Method::GET, &url, |r| r)
    }

    fn get_possible_permissions(
        &self,
        object_type: ObjectType,
        object_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = match object_id {
            Some(id) => self.url(&[object_type.as_path(), id, "permissionLevels"])?,
            None => self.url(&[object_type.as_path(), "permissionLevels"])?,
        };
        self.send(Method::GET, &url, |r| r)
    }

    fn update_permissions(
        &self,
        object_type: ObjectType,
        object_id: &str,
        access_control_list: &[AccessControlRequest],
    ) -> Result<Value, ApiError> {
        let url = self.url(&[object_type.as_path(), object_id])?;
        let body = json!({ "access_control_list": access_control_list });
        self.send(Method::PATCH, &url, |r| r.json(&body))
    }
}
