pub mod app_state;
pub mod config;
pub mod error;
pub mod types;
pub mod validate;

pub use app_state::AppState;
pub use config::Config;
pub use error::SearchError;
