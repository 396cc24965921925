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

use std::collections::HashMap;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::client::Client;
use crate::error::Result;
use crate::utils::request::HttpTransport;

/// A DNS zone managed by VinylDNS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Assigned by the service; leave empty when creating.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub admin_group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub shared: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<ZoneConnection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_connection: Option<ZoneConnection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_sync: Option<String>,
    #[serde(flatten, default)]
    pub extra: HashMap<String, Value>,
}

/// TSIG-authenticated connection to the zone's primary server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConnection {
    pub name: String,
    pub key_name: String,
    pub key: String,
    pub primary_server: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneResponse {
    pub zone: Zone,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonesResponse {
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub max_items: Option<u32>,
    #[serde(default)]
    pub next_id: Option<String>,
}

/// Result of a zone create, update or delete. The change is applied
/// asynchronously by the service; `status` starts out `Pending`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneUpdateResponse {
    pub zone: Zone,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub change_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub id: String,
}

impl<T: HttpTransport> Client<T> {
    /// Lists the zones visible to the caller.
    pub async fn zones(&self) -> Result<Vec<Zone>> {
        let response: ZonesResponse = self.get_json(&["zones"]).await?;
        Ok(response.zones)
    }

    pub async fn zone(&self, id: &str) -> Result<Zone> {
        let response: ZoneResponse = self.get_json(&["zones", id]).await?;
        Ok(response.zone)
    }

    /// Looks a zone up by its fully qualified name, e.g. `ok.`.
    pub async fn zone_by_name(&self, name: &str) -> Result<Zone> {
        let response: ZoneResponse = self.get_json(&["zones", "name", name]).await?;
        Ok(response.zone)
    }

    pub async fn zone_create(&self, zone: &Zone) -> Result<ZoneUpdateResponse> {
        self.send_json(Method::POST, &["zones"], zone).await
    }

    pub async fn zone_update(&self, zone: &Zone) -> Result<ZoneUpdateResponse> {
        self.send_json(Method::PUT, &["zones", zone.id.as_str()], zone).await
    }

    pub async fn zone_delete(&self, id: &str) -> Result<ZoneUpdateResponse> {
        self.delete_json(&["zones", id]).await
    }
}
