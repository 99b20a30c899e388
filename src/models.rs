use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted chart values for one email key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    #[serde(rename = "email")]
    pub key: String,
    pub values: Vec<f64>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub email: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct LoadRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub points: Vec<ChartPoint>,
    pub values: Vec<f64>,
    pub active_key: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveResponse {
    Saved {
        key: String,
        updated_at: DateTime<Utc>,
        points: Vec<ChartPoint>,
    },
    ConfirmationRequired {
        key: String,
        previous_values: Vec<f64>,
    },
}
