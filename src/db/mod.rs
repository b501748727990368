pub mod initialize;
pub mod stats;
