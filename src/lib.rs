pub mod api;
pub mod availability;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod permissions;
pub mod venues;
