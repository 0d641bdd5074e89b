//! Route modules for the API server
//!
//! - reports: the six report views plus their JSON API
//! - period: preset list and range resolution
//! - storage: files served from the storage backend

pub mod period;
pub mod reports;
pub mod storage;
