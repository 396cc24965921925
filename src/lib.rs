//! SDK for the VinylDNS DNS management API
//!
//! Supported features:
//! - Configuration from explicit values or `VINYLDNS_*` environment variables
//! - AWS Signature V4 request signing
//! - Asynchronous zone, record set, group and batch change operations
//!
//! # Example
//! ```no_run
//! use vinyldns_sdk::{Client, ClientConfiguration};
//!
//! # async fn run() -> vinyldns_sdk::Result<()> {
//! let client = Client::new(ClientConfiguration::new(
//!     "your_access_key",
//!     "your_secret_key",
//!     "https://vinyldns.example.com",
//!     vinyldns_sdk::config::default_user_agent(),
//! ));
//!
//! for zone in client.zones().await? {
//!     println!("{} ({})", zone.name, zone.id);
//! }
//! # Ok(())
//! # }
//! ```

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

pub mod client;
pub mod config;
pub mod error;
pub mod resources;
mod utils;

pub use client::Client;
pub use config::{ClientConfiguration, EnvSource, MemoryEnv, ProcessEnv};
pub use error::{Error, Result};
pub use utils::request::{DefaultTransport, HttpRequest, HttpResponse, HttpTransport};

/// SDK version reported in the default user agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
