pub mod clock;
pub mod company;
pub mod config;
pub mod export;
pub mod session;
pub mod stats;
pub mod ticker;
