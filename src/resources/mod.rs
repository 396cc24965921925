//! Typed VinylDNS resources and the [`Client`](crate::client::Client)
//! operations that read and change them.
//!
//! Every list operation returns the first page the service hands back.

pub mod batch_changes;
pub mod groups;
pub mod record_sets;
pub mod zones;

pub use batch_changes::{BatchChangeSummary, BatchChangesResponse, BatchRecordChange, RecordChange};
pub use groups::{Group, GroupMember, GroupsResponse};
pub use record_sets::{Record, RecordSet, RecordSetResponse, RecordSetUpdateResponse, RecordSetsResponse};
pub use zones::{Zone, ZoneConnection, ZoneResponse, ZoneUpdateResponse, ZonesResponse};
