//! Data layer: domain model, seed fixtures, and the in-memory store

pub mod mock;
pub mod model;
pub mod store;

pub use model::*;
pub use store::{delete_row, find_mut, insert_top, next_id, toggle_status, DataStore, TableRow};
