pub mod air;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod liveness;
pub mod status;
