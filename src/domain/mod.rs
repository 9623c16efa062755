//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, auth, state machine)
//! - `catalog` - Courses, lectures and student profiles
//! - `checkout` - Orders, payment signatures and batch enrollment
//! - `progress` - Lecture completion tracking

pub mod catalog;
pub mod checkout;
pub mod foundation;
pub mod progress;
