//! Service plumbing shared by High Street Investor services.

pub mod config;
pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
