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

use chrono::{DateTime, Utc};
use hex::encode as hex_encode;
use hmac::{Hmac, KeyInit, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE, HOST};
use sha2::{Digest, Sha256};
use crate::error::Result;
use crate::utils::request::HttpRequest;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const REGION: &str = "us-east-1";
const SERVICE: &str = "VinylDNS";
const AMZ_DATE: &str = "x-amz-date";

/// Everything except the RFC 3986 unreserved characters.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Signs requests with AWS Signature Version 4, which VinylDNS uses to
/// authenticate access keys.
#[derive(Clone)]
pub(crate) struct Signer<'a> {
    access_key: &'a str,
    secret_key: &'a str,
    region: &'a str,
    service: &'a str,
    timestamp: DateTime<Utc>,
}

impl<'a> Signer<'a> {
    /// Creates a signer for the current time.
    pub(crate) fn new(access_key: &'a str, secret_key: &'a str) -> Self {
        Self {
            access_key,
            secret_key,
            region: REGION,
            service: SERVICE,
            timestamp: Utc::now(),
        }
    }

    #[cfg(test)]
    fn service(mut self, service: &'a str) -> Self {
        self.service = service;
        self
    }

    #[cfg(test)]
    fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    fn amz_date(&self) -> String {
        self.timestamp.format("%Y%m%dT%H%M%SZ").to_string()
    }

    fn date(&self) -> String {
        self.timestamp.format("%Y%m%d").to_string()
    }

    fn credential_scope(&self) -> String {
        format!("{}/{}/{}/aws4_request", self.date(), self.region, self.service)
    }

    fn sign(key: &[u8], msg: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
        mac.update(msg.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    fn sha256_hex(input: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        hex_encode(hasher.finalize())
    }

    /// Header names and values covered by the signature, sorted by name.
    fn signed_headers(request: &HttpRequest) -> Vec<(String, String)> {
        let mut signed: Vec<(String, String)> = request
            .headers
            .iter()
            .filter(|(name, _)| [HOST, CONTENT_TYPE].contains(*name) || name.as_str() == AMZ_DATE)
            .map(|(name, value)| {
                let value = String::from_utf8_lossy(value.as_bytes()).trim().to_string();
                (name.as_str().to_string(), value)
            })
            .collect();
        signed.sort();
        signed
    }

    fn canonical_request(request: &HttpRequest, signed: &[(String, String)]) -> String {
        let canonical_headers: String = signed
            .iter()
            .map(|(name, value)| format!("{}:{}\n", name, value))
            .collect();
        let signed_names = signed_header_names(signed);
        let hashed_payload = Self::sha256_hex(request.body.as_deref().unwrap_or(""));
        format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            request.method.as_str(),
            request.url.path(),
            canonical_query_string(request),
            canonical_headers,
            signed_names,
            hashed_payload
        )
    }

    fn string_to_sign(&self, canonical_request: &str) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            self.amz_date(),
            self.credential_scope(),
            Self::sha256_hex(canonical_request)
        )
    }

    fn calculate_signature(&self, string_to_sign: &str) -> String {
        let secret_date = Self::sign(format!("AWS4{}", self.secret_key).as_bytes(), &self.date());
        let secret_region = Self::sign(&secret_date, self.region);
        let secret_service = Self::sign(&secret_region, self.service);
        let secret_signing = Self::sign(&secret_service, "aws4_request");
        hex_encode(Self::sign(&secret_signing, string_to_sign))
    }

    /// Adds `Host`, `X-Amz-Date` and `Authorization` headers to `request`.
    pub(crate) fn sign_request(&self, request: &mut HttpRequest) -> Result<()> {
        let host = match (request.url.host_str(), request.url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };
        request.headers.insert(HOST, HeaderValue::from_str(&host)?);
        request.headers.insert(AMZ_DATE, HeaderValue::from_str(&self.amz_date())?);

        let signed = Self::signed_headers(request);
        let canonical_request = Self::canonical_request(request, &signed);
        let string_to_sign = self.string_to_sign(&canonical_request);
        let signature = self.calculate_signature(&string_to_sign);

        let authorization = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM,
            self.access_key,
            self.credential_scope(),
            signed_header_names(&signed),
            signature
        );
        request.headers.insert(AUTHORIZATION, HeaderValue::from_str(&authorization)?);
        Ok(())
    }
}

fn signed_header_names(signed: &[(String, String)]) -> String {
    signed
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";")
}

fn canonical_query_string(request: &HttpRequest) -> String {
    let mut pairs: Vec<(String, String)> = request
        .url
        .query_pairs()
        .map(|(k, v)| {
            (
                utf8_percent_encode(&k, QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(&v, QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}
