//! Ordered set of course ids submitted with a checkout request.

use crate::domain::foundation::CourseId;

use super::CheckoutError;

/// Non-empty, duplicate-free list of course ids in submission order.
///
/// Duplicates are collapsed and the first occurrence keeps its position, so
/// a buyer is never charged twice for the same course in one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseBatch(Vec<CourseId>);

impl CourseBatch {
    pub fn new(ids: Vec<CourseId>) -> Result<Self, CheckoutError> {
        let mut unique: Vec<CourseId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        if unique.is_empty() {
            return Err(CheckoutError::validation("courses", "Please provide an array of course IDs"));
        }
        Ok(Self(unique))
    }

    /// Parses raw ids from a request body, naming `field` on failure.
    pub fn parse(field: &str, raw: Option<Vec<String>>) -> Result<Self, CheckoutError> {
        let raw = raw.unwrap_or_default();
        if raw.is_empty() {
            return Err(CheckoutError::validation(field, "Please provide an array of course IDs"));
        }
        let ids = raw
            .into_iter()
            .map(CourseId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| CheckoutError::validation(field, "Course IDs must not be blank"))?;
        Self::new(ids)
    }

    pub fn ids(&self) -> &[CourseId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseId> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a CourseBatch {
    type Item = &'a CourseId;
    type IntoIter = std::slice::Iter<'a, CourseId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
