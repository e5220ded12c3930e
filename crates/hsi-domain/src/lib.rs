//! Domain types shared across High Street Investor services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod credential;
pub mod pagination;
pub mod permission;
