pub mod authors;
pub mod common;
pub mod completions;
pub mod debut;
pub mod graph;
