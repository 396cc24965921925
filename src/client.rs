// Copyright 2023 rust-dns-sdk authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::fmt;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use crate::config::ClientConfiguration;
use crate::error::{Error, Result};
use crate::utils::request::{DefaultTransport, HttpRequest, HttpTransport};
use crate::utils::signature::Signer;

/// Handle to a VinylDNS API.
///
/// Holds the credentials, host and user agent it was built with; these never
/// change after construction. Resource operations live in
/// [`resources`](crate::resources).
pub struct Client<T: HttpTransport = DefaultTransport> {
    access_key: String,
    secret_key: String,
    host: String,
    user_agent: String,
    http_client: T,
}

impl Client<DefaultTransport> {
    /// Builds a client from an explicit configuration.
    ///
    /// Fields are copied unchanged; construction cannot fail.
    pub fn new(config: ClientConfiguration) -> Self {
        Self::with_transport(config, DefaultTransport::new())
    }

    /// Resolves a [`ClientConfiguration`] from the process environment and
    /// builds a client from it.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfiguration::from_env()?))
    }
}

impl<T: HttpTransport> Client<T> {
    pub fn with_transport(config: ClientConfiguration, http_client: T) -> Self {
        let ClientConfiguration {
            access_key,
            secret_key,
            host,
            user_agent,
        } = config;
        Self {
            access_key,
            secret_key,
            host,
            user_agent,
            http_client,
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Configuration this client was built from.
    pub fn configuration(&self) -> ClientConfiguration {
        ClientConfiguration::new(
            self.access_key.clone(),
            self.secret_key.clone(),
            self.host.clone(),
            self.user_agent.clone(),
        )
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.http_client
    }

    /// Appends `segments` to the host's path, percent-encoding each one.
    /// Hosts without a scheme are reached over https.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(Error::InvalidPathSegment(bad.to_string()));
        }

        let base = self.host.trim_end_matches('/');
        let raw = if base.contains("://") {
            base.to_string()
        } else {
            format!("https://{}", base)
        };
        let mut url = Url::parse(&raw).map_err(|e| Error::InvalidHost(format!("{}: {}", raw, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidHost(raw.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Signs and sends a request, returning the body of a successful response.
    pub(crate) async fn execute(&self, method: Method, segments: &[&str], body: Option<String>) -> Result<String> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let mut request = HttpRequest {
            method,
            url: self.url(segments)?,
            headers,
            body,
        };
        Signer::new(&self.access_key, &self.secret_key).sign_request(&mut request)?;

        debug!(method = %request.method, url = %request.url, "sending vinyldns request");
        let response = self.http_client.send(request).await?;

        if !response.status.is_success() {
            warn!(status = response.status.as_u16(), path = %segments.join("/"), "vinyldns request failed");
            return Err(Error::Api {
                status: response.status.as_u16(),
                message: response.body.trim().to_string(),
            });
        }

        Ok(response.body)
    }

    pub(crate) async fn get_json<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R> {
        let body = self.execute(Method::GET, segments, None).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn send_json<B, R>(&self, method: Method, segments: &[&str], payload: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let body = self.execute(method, segments, Some(serde_json::to_string(payload)?)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn delete_json<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R> {
        let body = self.execute(Method::DELETE, segments, None).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Checks that the service is reachable; VinylDNS answers `PONG`.
    pub async fn ping(&self) -> Result<String> {
        let body = self.execute(Method::GET, &["ping"], None).await?;
        Ok(body.trim().to_string())
    }
}

impl<T: HttpTransport> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("host", &self.host)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;
    use crate::config::ProcessEnvGuard;
    use crate::utils::request::mock::MockTransport;

    const TEST_ACCESS_KEY: &str = "access granted";
    const TEST_SECRET_KEY: &str = "this is very secret";
    const TEST_HOST: &str = "certainly.a.unique.host";
    const TEST_USER_AGENT: &str = "certainly.a.unique.userAgent";

    fn mock_client(transport: MockTransport) -> Client<MockTransport> {
        Client::with_transport(
            ClientConfiguration::new("ak", "sk", "http://localhost:9000/", "test-agent/1.0"),
            transport,
        )
    }

    #[test]
    fn test_new_client() {
        let client = Client::new(ClientConfiguration::new(
            TEST_ACCESS_KEY,
            TEST_SECRET_KEY,
            TEST_HOST,
            TEST_USER_AGENT,
        ));

        assert_eq!(client.access_key(), TEST_ACCESS_KEY);
        assert_eq!(client.secret_key(), TEST_SECRET_KEY);
        assert_eq!(client.host(), TEST_HOST);
        assert_eq!(client.user_agent(), TEST_USER_AGENT);
    }

    #[test]
    fn test_new_client_keeps_empty_fields() {
        let config = ClientConfiguration::new("", "", "", "");
        let client = Client::new(config.clone());
        assert_eq!(client.configuration(), config);
    }

    #[test]
    fn test_client_from_env_uses_environment() {
        let vars = ProcessEnvGuard::acquire();
        vars.set("VINYLDNS_ACCESS_KEY", "env-ak");
        vars.set("VINYLDNS_SECRET_KEY", "env-sk");
        vars.set("VINYLDNS_HOST", "env.host");
        vars.set("VINYLDNS_USER_AGENT", "env-agent");

        let client = Client::from_env().unwrap();

        assert_eq!(
            client.configuration(),
            ClientConfiguration::new("env-ak", "env-sk", "env.host", "env-agent")
        );
    }

    #[test]
    fn test_url_joins_host_and_path() {
        let client = mock_client(MockTransport::default());
        assert_eq!(client.url(&["zones"]).unwrap().as_str(), "http://localhost:9000/zones");

        let bare = Client::new(ClientConfiguration::new("a", "s", "host.name.com", "ua"));
        assert_eq!(bare.url(&["zones"]).unwrap().as_str(), "https://host.name.com/zones");
    }

    #[test]
    fn test_url_rejects_garbage_host() {
        let client = Client::new(ClientConfiguration::new("a", "s", "http://exa mple.com", "ua"));
        assert!(matches!(client.url(&["zones"]), Err(Error::InvalidHost(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let client = Client::new(ClientConfiguration::new("a", "hunter2", "h", "ua"));
        assert!(!format!("{:?}", client).contains("hunter2"));
    }

    #[tokio::test]
    async fn test_requests_are_signed_with_user_agent() {
        let client = mock_client(MockTransport::default().respond(200, "PONG\n"));

        assert_eq!(client.ping().await.unwrap(), "PONG");

        let request = client.http_client.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url.as_str(), "http://localhost:9000/ping");
        assert_eq!(request.headers[USER_AGENT], "test-agent/1.0");
        let authorization = request.headers[AUTHORIZATION].to_str().unwrap();
        assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential=ak/"));
        assert!(request.headers.get(CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error() {
        let client = mock_client(MockTransport::default().respond(404, "Zone not found \n"));

        let err = client.ping().await.unwrap_err();

        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Zone not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_user_agent_is_rejected_before_sending() {
        let client = Client::with_transport(
            ClientConfiguration::new("a", "s", "http://h", "bad\nagent"),
            MockTransport::default(),
        );

        assert!(matches!(client.ping().await, Err(Error::InvalidHeader(_))));
        assert!(client.http_client.requests().is_empty());
    }
}
