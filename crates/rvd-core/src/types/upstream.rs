use crate::types::ids::EventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event timing data as returned by the event catalog.
///
/// Field names follow the catalog's JSON contract; everything beyond the
/// id and end time is optional and unused by the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    pub id: EventId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date_time: Option<DateTime<Utc>>,
    pub end_date_time: DateTime<Utc>,
    #[serde(default)]
    pub owner_id: Option<i64>,
}
