use chrono::{Local, LocalResult, TimeZone};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One occupancy observation as served by `/dashboard_data` and rendered by
/// the watch table. Order of fields is the cell order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
pub struct Record {
    #[tabled(rename = "Time")]
    pub time: String,
    #[tabled(rename = "Count")]
    pub count: i64,
    #[tabled(rename = "Capacity")]
    pub capacity: i64,
}

/// Stored reading, one row of the `logs` table.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct LogRow {
    pub ts: i64,
    pub count: i64,
    pub capacity: i64,
}

impl LogRow {
    pub fn into_record(self) -> Record {
        Record {
            time: format_ts(self.ts),
            count: self.count,
            capacity: self.capacity,
        }
    }
}

pub fn format_ts(ts: i64) -> String {
    match Local.timestamp_opt(ts, 0) {
        LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        // timestamps outside the representable range fall back to raw seconds
        _ => ts.to_string(),
    }
}
