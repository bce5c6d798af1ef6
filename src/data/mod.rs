//! Input loading and diagnostics

pub mod edges;
pub mod preprocessing;

pub use edges::{load_edge_list, DEFAULT_FROM_COLUMN, DEFAULT_TO_COLUMN};
pub use preprocessing::{profile, InputProfile};
