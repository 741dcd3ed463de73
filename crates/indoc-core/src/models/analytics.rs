use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Totals block of `GET /analytics/summary`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsTotals {
    pub documents: i64,
    pub storage_bytes: i64,
    pub ready: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsSummary {
    pub totals: AnalyticsTotals,
}

/// Response of `GET /analytics/processing`: per-status document counts plus
/// the number of documents that completed processing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessingSummary {
    pub status_counts: HashMap<String, i64>,
    pub processed_total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_shape() {
        let summary = AnalyticsSummary {
            totals: AnalyticsTotals {
                documents: 12,
                storage_bytes: 4096,
                ready: 7,
            },
        };
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["totals"]["documents"], 12);
        assert_eq!(json["totals"]["storage_bytes"], 4096);
    }

    #[test]
    fn test_processing_summary_shape() {
        let mut status_counts = HashMap::new();
        status_counts.insert("ready".to_string(), 3);
        status_counts.insert("processing".to_string(), 1);
        let summary = ProcessingSummary {
            status_counts,
            processed_total: 3,
        };
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["status_counts"]["ready"], 3);
        assert_eq!(json["processed_total"], 3);
    }
}
