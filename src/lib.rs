pub mod config;
pub mod logging;
pub mod report;
pub mod scan;
pub mod version;
