pub mod artist;
pub mod show;
pub mod venue;

use serde::Serialize;

use crate::grouping::EntityRef;

/// Name-substring search response: matches plus their count.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntityRef>,
}
