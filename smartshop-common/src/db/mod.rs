//! Database access layer: initialization, models, seed catalog

pub mod init;
pub mod models;
pub mod seed;

pub use init::init_database;
