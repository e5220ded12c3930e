//! Test utilities for High Street Investor services.
//!
//! Dev-dependency only.

pub mod auth;
