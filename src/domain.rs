//! Domain logic
//!
//! - Layout measurement contract
//! - Truncation and toggle region geometry
//! - Fold configuration and state

pub mod config;
pub mod geometry;
pub mod layout;
pub mod region;
pub mod toggle;
pub mod truncation;
