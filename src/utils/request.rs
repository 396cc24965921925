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

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode, Url};
use crate::error::Result;

/// A fully built, signed request ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Sends requests on behalf of a [`Client`](crate::client::Client).
///
/// Implement this to route traffic through a custom HTTP stack or to stub the
/// service in tests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct DefaultTransport {
    inner: Client,
}

impl DefaultTransport {
    pub fn new() -> Self {
        Self {
            inner: Client::new(),
        }
    }

    /// Uses an already configured `reqwest` client (timeouts, proxies, tls).
    pub fn with_client(inner: Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl HttpTransport for DefaultTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut req = self
            .inner
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            req = req.body(body);
        }
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
