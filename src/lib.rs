pub mod config;
pub mod error;
pub mod lang;
pub mod scan;
pub mod types;
