//! Parlay Agent — expert-vs-book +EV picks and parlay report.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod odds;
pub mod estimates;
pub mod strategy;
pub mod engine;
pub mod render;
pub mod dashboard;
