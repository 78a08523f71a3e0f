//! API Routes
//!
//! Route handlers organized by functionality.

pub mod aggregates;
pub mod health;
pub mod views;
