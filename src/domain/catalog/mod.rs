//! Catalog module - the course and student records the checkout flow reads
//! and mutates.
//!
//! Course and user documents are owned by other parts of the marketplace;
//! this module only models the fields the checkout, enrollment and progress
//! flows actually touch.

mod course;
mod membership;
mod student;

pub use course::{Course, SubSection};
pub use membership::MembershipChange;
pub use student::StudentProfile;
