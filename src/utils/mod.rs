pub mod colors;
pub mod date;
pub mod path;
pub mod table;
pub mod time;

pub use time::{duration_components, format_hms, format_worked};
