use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Incoming search request: the phrase to rank-check and the site to look for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_term: String,
    pub target_url: String,
}

/// One completed search pass, as persisted. Append-only: records are never
/// updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    /// Assigned by the repository on save; `None` before persistence.
    pub id: Option<i64>,
    pub search_term: String,
    /// Trimmed and lowercased form of the requested target URL.
    pub target_url: String,
    /// 1-based ranks at which the target domain appeared, ascending.
    pub positions: Vec<u32>,
    /// Number of ranked results considered in this pass.
    pub total_results: u32,
    pub search_date: DateTime<Utc>,
}

impl SearchRecord {
    /// Comma-separated encoding used by the storage column. Round-trips
    /// through [`parse_positions`] without loss or reordering.
    pub fn positions_csv(&self) -> String {
        self.positions
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Decode the comma-separated position column. The empty string is a valid
/// empty list (target never appeared).
pub fn parse_positions(csv: &str) -> Vec<u32> {
    csv.split(',')
        .filter_map(|p| p.trim().parse::<u32>().ok())
        .collect()
}

/// Caller-facing projection of a [`SearchRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultDto {
    pub positions: Vec<u32>,
    pub search_term: String,
    pub total_hits: usize,
    pub target_url: String,
    pub search_date: DateTime<Utc>,
    pub total_results: u32,
    /// Display form: `"2, 14"`, or `"0"` when the target never appeared.
    pub formatted_positions: String,
}

impl From<SearchRecord> for SearchResultDto {
    fn from(record: SearchRecord) -> Self {
        let formatted_positions = if record.positions.is_empty() {
            "0".to_string()
        } else {
            record
                .positions
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        Self {
            total_hits: record.positions.len(),
            positions: record.positions,
            search_term: record.search_term,
            target_url: record.target_url,
            search_date: record.search_date,
            total_results: record.total_results,
            formatted_positions,
        }
    }
}

/// Per-day aggregate for one search term over a day window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Best (lowest) rank seen that day; 0 when the target never appeared.
    pub best_position: u32,
    pub total_occurrences: usize,
    /// All ranks seen that day, sorted ascending.
    pub positions: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(positions: Vec<u32>) -> SearchRecord {
        SearchRecord {
            id: None,
            search_term: "rust web framework".into(),
            target_url: "example.com".into(),
            positions,
            total_results: 20,
            search_date: Utc::now(),
        }
    }

    #[test]
    fn positions_round_trip_through_csv() {
        let rec = record(vec![2, 5, 14]);
        assert_eq!(rec.positions_csv(), "2,5,14");
        assert_eq!(parse_positions(&rec.positions_csv()), vec![2, 5, 14]);
    }

    #[test]
    fn empty_positions_round_trip() {
        let rec = record(vec![]);
        assert_eq!(rec.positions_csv(), "");
        assert_eq!(parse_positions(""), Vec::<u32>::new());
    }

    #[test]
    fn dto_serializes_with_camel_case_fields() {
        let dto = SearchResultDto::from(record(vec![2]));
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["searchTerm"], "rust web framework");
        assert_eq!(json["totalResults"], 20);
        assert_eq!(json["totalHits"], 1);
        assert_eq!(json["formattedPositions"], "2");
        assert!(json["searchDate"].is_string());
    }

    #[test]
    fn request_accepts_camel_case_payloads() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"searchTerm":"rust","targetUrl":"example.com"}"#).unwrap();
        assert_eq!(request.search_term, "rust");
        assert_eq!(request.target_url, "example.com");
    }

    #[test]
    fn dto_formats_missing_target_as_zero() {
        let dto = SearchResultDto::from(record(vec![]));
        assert_eq!(dto.formatted_positions, "0");
        assert_eq!(dto.total_hits, 0);

        let dto = SearchResultDto::from(record(vec![1, 3]));
        assert_eq!(dto.formatted_positions, "1, 3");
        assert_eq!(dto.total_hits, 2);
    }
}
