//! Orchestrates one search pass and the read paths over stored history.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::core::types::{SearchRecord, SearchRequest, SearchResultDto, TrendPoint};
use crate::core::{validate, SearchError};
use crate::engines::SearchEngine;
use crate::features::history::SearchResultRepository;
use crate::ranking;

pub struct SearchService {
    engine: Arc<dyn SearchEngine>,
    repository: Arc<dyn SearchResultRepository>,
    /// Result-count hint passed to the engine per query.
    max_results: usize,
}

impl SearchService {
    pub fn new(
        engine: Arc<dyn SearchEngine>,
        repository: Arc<dyn SearchResultRepository>,
        max_results: usize,
    ) -> Self {
        Self {
            engine,
            repository,
            max_results,
        }
    }

    /// One full search pass: validate, fetch the ranked list, locate the
    /// target, persist the record. Any failure aborts the whole run and
    /// nothing is written.
    pub async fn run(&self, request: &SearchRequest) -> Result<SearchResultDto, SearchError> {
        validate::validate_request(request)?;

        info!(term = %request.search_term, target = %request.target_url, "starting search pass");

        let results = self
            .engine
            .search(&request.search_term, self.max_results)
            .await?;
        let positions = ranking::find_positions(&results, &request.target_url);

        let record = SearchRecord {
            id: None,
            search_term: request.search_term.trim().to_string(),
            target_url: request.target_url.trim().to_lowercase(),
            positions,
            total_results: results.len() as u32,
            search_date: Utc::now(),
        };

        let saved = self.repository.save(record).await?;
        info!(
            positions = %saved.positions_csv(),
            total = saved.total_results,
            "search pass complete"
        );
        Ok(saved.into())
    }

    pub async fn history(
        &self,
        term_filter: Option<&str>,
        days: u32,
    ) -> Result<Vec<SearchResultDto>, SearchError> {
        let records = self.repository.history(term_filter, days).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Per-day aggregates for a term: best (lowest) rank, occurrence count,
    /// and the sorted rank list, ascending by date.
    pub async fn trends(&self, term: &str, days: u32) -> Result<Vec<TrendPoint>, SearchError> {
        let records = self.repository.by_term(term, days).await?;

        let mut by_date: BTreeMap<chrono::NaiveDate, Vec<u32>> = BTreeMap::new();
        for record in records {
            by_date
                .entry(record.search_date.date_naive())
                .or_default()
                .extend(record.positions);
        }

        Ok(by_date
            .into_iter()
            .map(|(date, mut positions)| {
                positions.sort_unstable();
                TrendPoint {
                    date,
                    best_position: positions.first().copied().unwrap_or(0),
                    total_occurrences: positions.len(),
                    positions,
                }
            })
            .collect())
    }
}
