pub mod chart;
pub mod config;
pub mod fs;
pub mod output;
pub mod remote;
pub mod usage;
