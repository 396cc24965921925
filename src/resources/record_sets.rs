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
use crate::resources::zones::Zone;
use crate::utils::request::HttpTransport;

/// A set of records sharing a name and type within a zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSet {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub name: String,
    /// Record type, e.g. `A`, `CNAME`, `TXT`
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(flatten, default)]
    pub extra: HashMap<String, Value>,
}

/// Record data. Which fields are set depends on the record type; anything
/// not modelled here lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// A and AAAA
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ptrdname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsdname: Option<String>,
    /// TXT and SPF
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// MX
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<u16>,
    #[serde(flatten, default)]
    pub extra: HashMap<String, Value>,
}

impl Record {
    pub fn address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Default::default()
        }
    }

    pub fn cname(cname: impl Into<String>) -> Self {
        Self {
            cname: Some(cname.into()),
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetResponse {
    pub record_set: RecordSet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetsResponse {
    #[serde(default)]
    pub record_sets: Vec<RecordSet>,
    #[serde(default)]
    pub next_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetUpdateResponse {
    #[serde(default)]
    pub zone: Zone,
    pub record_set: RecordSet,
    #[serde(default)]
    pub change_id: String,
    #[serde(default)]
    pub status: String,
}

impl<T: HttpTransport> Client<T> {
    pub async fn record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>> {
        let response: RecordSetsResponse = self
            .get_json(&["zones", zone_id, "recordsets"])
            .await?;
        Ok(response.record_sets)
    }

    pub async fn record_set(&self, zone_id: &str, id: &str) -> Result<RecordSet> {
        let response: RecordSetResponse = self
            .get_json(&["zones", zone_id, "recordsets", id])
            .await?;
        Ok(response.record_set)
    }

    /// Creates `record_set` in the zone named by its `zone_id`.
    pub async fn record_set_create(&self, record_set: &RecordSet) -> Result<RecordSetUpdateResponse> {
        let path = ["zones", record_set.zone_id.as_str(), "recordsets"];
        self.send_json(Method::POST, &path, record_set).await
    }

    pub async fn record_set_update(&self, record_set: &RecordSet) -> Result<RecordSetUpdateResponse> {
        let path = ["zones", record_set.zone_id.as_str(), "recordsets", record_set.id.as_str()];
        self.send_json(Method::PUT, &path, record_set).await
    }

    pub async fn record_set_delete(&self, zone_id: &str, id: &str) -> Result<RecordSetUpdateResponse> {
        self.delete_json(&["zones", zone_id, "recordsets", id])
            .await
    }
}
