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
use crate::resources::record_sets::Record;
use crate::utils::request::HttpTransport;

const BATCH_PATH: [&str; 2] = ["zones", "batchrecordchanges"];

/// Several record changes submitted, validated and applied together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecordChange {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub changes: Vec<RecordChange>,
    #[serde(flatten, default)]
    pub extra: HashMap<String, Value>,
}

/// One entry of a batch change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordChange {
    /// Fully qualified record name, e.g. `www.ok.`
    pub input_name: String,
    /// `Add` or `DeleteRecordSet`
    pub change_type: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchChangeSummary {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub created_timestamp: String,
    #[serde(default)]
    pub total_changes: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub owner_group_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchChangesResponse {
    #[serde(default)]
    pub batch_changes: Vec<BatchChangeSummary>,
    #[serde(default)]
    pub max_items: Option<u32>,
}

impl<T: HttpTransport> Client<T> {
    /// Lists summaries of the caller's batch changes.
    pub async fn batch_record_changes(&self) -> Result<Vec<BatchChangeSummary>> {
        let response: BatchChangesResponse = self.get_json(&BATCH_PATH).await?;
        Ok(response.batch_changes)
    }

    pub async fn batch_record_change(&self, id: &str) -> Result<BatchRecordChange> {
        self.get_json(&[BATCH_PATH[0], BATCH_PATH[1], id]).await
    }

    /// Submits a batch change. Validation failures come back as an
    /// [`Error::Api`](crate::error::Error::Api) carrying the service's report.
    pub async fn batch_record_change_create(&self, change: &BatchRecordChange) -> Result<BatchRecordChange> {
        self.send_json(Method::POST, &BATCH_PATH, change).await
    }
}
