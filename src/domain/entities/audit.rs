use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::lenient;

/// Server-paginated list envelope shared by `/data` and `/access`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            page: 1,
            limit: 20,
            total: 0,
            total_pages: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Insert,
    Update,
    Delete,
    #[serde(other)]
    Other,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Other => "OTHER",
        }
    }
}

/// One row of the data change log. Timeline entries share this shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAuditRecord {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    pub timestamp: String,
    pub operation: Operation,
    #[serde(default)]
    pub system_id: Option<String>,
    #[serde(default)]
    pub schema_name: Option<String>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub changed_fields: Vec<String>,
    #[serde(default)]
    pub old_values: Option<Map<String, Value>>,
    #[serde(default)]
    pub new_values: Option<Map<String, Value>>,
    /// Either an object or a JSON-encoded object, depending on the writer.
    #[serde(default)]
    pub key_values: Option<Value>,
    #[serde(default)]
    pub request_path: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

pub type TimelineEvent = DataAuditRecord;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogRecord {
    pub timestamp: String,
    #[serde(default)]
    pub request_method: Option<String>,
    #[serde(default)]
    pub request_path: Option<String>,
    #[serde(default)]
    pub response_status: Option<u16>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<f64>,
    #[serde(default)]
    pub system_id: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct OperationCounts {
    #[serde(default, rename = "INSERT")]
    pub insert: u64,
    #[serde(default, rename = "UPDATE")]
    pub update: u64,
    #[serde(default, rename = "DELETE")]
    pub delete: u64,
}

impl OperationCounts {
    pub fn total(&self) -> u64 {
        self.insert + self.update + self.delete
    }
}

/// Per-table, per-user and per-endpoint change breakdowns all share counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeBreakdown {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub inserts: u64,
    #[serde(default)]
    pub updates: u64,
    #[serde(default)]
    pub deletes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableChangeStat {
    pub table_name: String,
    #[serde(flatten)]
    pub counts: ChangeBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChangeStat {
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_name: String,
    #[serde(flatten)]
    pub counts: ChangeBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEndpointStat {
    pub endpoint: String,
    #[serde(flatten)]
    pub counts: ChangeBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorStats {
    #[serde(default, rename = "errors4xx")]
    pub errors_4xx: u64,
    #[serde(default, rename = "errors5xx")]
    pub errors_5xx: u64,
    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessUserStat {
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_name: String,
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub avg_duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEndpointStat {
    pub endpoint: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub avg_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCount {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGeoStats {
    #[serde(default)]
    pub by_country: Vec<LocationCount>,
    #[serde(default)]
    pub by_city: Vec<LocationCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpStat {
    pub ip_address: String,
    #[serde(default)]
    pub requests: u64,
    #[serde(default)]
    pub unique_users: u64,
    #[serde(default)]
    pub errors: u64,
}

/// One time bucket of `/access/stats/endpoint-timeline`: a `time` label plus
/// one request count per endpoint path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EndpointTimelinePoint {
    pub time: String,
    #[serde(flatten)]
    pub counts: BTreeMap<String, f64>,
}

pub type RetentionStats = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalHoldRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    pub reason: String,
}

/// Identifies a record for `/data/timeline`.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKey {
    Id(String),
    Composite(Map<String, Value>),
}

impl RecordKey {
    /// Parses the `keyValues` column of a change-log row, which arrives either
    /// as an object or as a JSON string holding one.
    pub fn from_key_values(raw: Option<&Value>) -> Result<Self, String> {
        match raw {
            Some(Value::Object(map)) if !map.is_empty() => Ok(RecordKey::Composite(map.clone())),
            Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) if !map.is_empty() => Ok(RecordKey::Composite(map)),
                Ok(_) => Err("la clave del registro no es un objeto".to_string()),
                Err(err) => Err(format!("no se pudo leer la clave del registro: {err}")),
            },
            _ => Err("no se encontraron datos de identificación del registro".to_string()),
        }
    }

    /// A single display id: `Id`/`id`/`ID` first, otherwise the first value.
    pub fn display_id(&self) -> String {
        match self {
            RecordKey::Id(id) => id.clone(),
            RecordKey::Composite(map) => ["Id", "id", "ID"]
                .iter()
                .find_map(|key| map.get(*key))
                .or_else(|| map.values().next())
                .map(crate::domain::diff::js_string)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordLocator {
    pub key: RecordKey,
    pub system_id: String,
    pub schema_name: String,
    pub table_name: String,
}

impl RecordLocator {
    pub fn from_row(row: &DataAuditRecord) -> Result<Self, String> {
        let key = RecordKey::from_key_values(row.key_values.as_ref())?;
        Ok(Self {
            key,
            system_id: row.system_id.clone().unwrap_or_default(),
            schema_name: row.schema_name.clone().unwrap_or_default(),
            table_name: row.table_name.clone().unwrap_or_default(),
        })
    }

    pub fn is_complete(&self) -> bool {
        let key_present = match &self.key {
            RecordKey::Id(id) => !id.trim().is_empty(),
            RecordKey::Composite(map) => !map.is_empty(),
        };
        key_present
            && !self.system_id.trim().is_empty()
            && !self.schema_name.trim().is_empty()
            && !self.table_name.trim().is_empty()
    }
}
