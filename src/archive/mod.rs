pub mod config;
pub mod ids;
pub mod manifest;
pub mod reconcile;
