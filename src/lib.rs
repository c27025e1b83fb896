//! Server-rendered venue/artist booking directory: three related entities
//! (venue, artist, show) over a relational store, with substring search,
//! city/state grouping, and past/upcoming show partitioning. An embedding
//! application wires the services here to its own request handlers and
//! templates.

pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod forms;
pub mod grouping;
pub mod logging;
pub mod schedule;
pub mod services;

#[cfg(test)]
pub mod test_utils;

pub use crate::config::Config;
pub use crate::database::Database;
pub use crate::error::{Error, Result};
