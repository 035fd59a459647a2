//! API route handlers

pub mod dashboard;
pub mod entries;
pub mod health;
