pub mod alarm;
pub mod company;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod stats;
pub mod timer;
pub mod work;
