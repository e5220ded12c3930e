//! Identity types shared between the gateway contract and services.

pub mod identity;
