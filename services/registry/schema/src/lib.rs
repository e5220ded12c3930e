//! sea-orm entities for the registry service.
//!
//! Relations are foreign-key ids plus `Related` impls for joins; no entity holds
//! a back-pointer to its owner.

pub mod institutions;
pub mod key_metrics;
pub mod other_details;
pub mod reports;
pub mod roles;
pub mod users;
