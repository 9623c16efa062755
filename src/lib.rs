//! LearnHub - course marketplace backend.
//!
//! Checkout for course batches, payment signature verification with batch
//! enrollment, payment receipts and course progress tracking.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
