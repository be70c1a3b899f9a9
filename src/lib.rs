pub mod api;
pub mod core;
pub mod engines;
pub mod features;
pub mod ranking;
pub mod service;

// --- Primary core exports ---
pub use core::types;
pub use core::AppState;
pub use core::Config;
pub use core::SearchError;

pub use engines::google::GoogleClient;
pub use engines::SearchEngine;
pub use features::history::{SearchResultRepository, SqliteSearchResultRepository};
pub use service::SearchService;
