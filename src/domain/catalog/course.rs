//! Course records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseId, SubSectionId, UserId};

/// A purchasable course.
///
/// `price` is in major currency units (whole rupees); conversion to the
/// provider's minor unit happens when an order is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub price: u64,
    pub students_enrolled: BTreeSet<UserId>,
}

impl Course {
    pub fn new(id: CourseId, name: impl Into<String>, price: u64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            students_enrolled: BTreeSet::new(),
        }
    }

    /// Adds a student to the roster (builder style, for seeding).
    pub fn with_student(mut self, student: UserId) -> Self {
        self.students_enrolled.insert(student);
        self
    }

    /// Returns true if the student is already on this course's roster.
    pub fn has_student(&self, student: &UserId) -> bool {
        self.students_enrolled.contains(student)
    }
}

/// A single video lecture inside a course section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSection {
    pub id: SubSectionId,
    pub title: String,
}
