//! Domain normalization and rank-position matching.

pub mod domain;
pub mod position;

pub use domain::normalize;
pub use position::{find_positions, is_match};
