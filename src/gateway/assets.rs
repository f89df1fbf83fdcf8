//! Sample asset listing served by the gateway itself.

use axum::Json;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// Three illustrative assets, created 5, 3 and 1 days before `now`.
pub fn sample_assets(now: DateTime<Utc>) -> Vec<Asset> {
    [(1, "Document", 5), (2, "Image", 3), (3, "Video", 1)]
        .into_iter()
        .map(|(id, kind, days_ago)| Asset {
            id,
            name: format!("Sample Asset {}", id),
            kind: kind.to_string(),
            created_at: now - Duration::days(days_ago),
        })
        .collect()
}

pub async fn list_assets() -> Json<Vec<Asset>> {
    Json(sample_assets(Utc::now()))
}
