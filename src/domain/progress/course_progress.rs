//! Per-student, per-course lecture completion.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::MembershipChange;
use crate::domain::foundation::{CourseId, SubSectionId, UserId};

/// Completed lectures of one student in one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub completed_videos: Vec<SubSectionId>,
}

impl CourseProgress {
    pub fn empty(user_id: UserId, course_id: CourseId) -> Self {
        Self {
            user_id,
            course_id,
            completed_videos: Vec::new(),
        }
    }

    pub fn has_completed(&self, sub_section: &SubSectionId) -> bool {
        self.completed_videos.contains(sub_section)
    }

    /// Marks a lecture complete; no-op when already present.
    pub fn complete(&mut self, sub_section: SubSectionId) -> MembershipChange {
        if self.has_completed(&sub_section) {
            return MembershipChange::AlreadyPresent;
        }
        self.completed_videos.push(sub_section);
        MembershipChange::Added
    }
}

/// What a progress update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressUpdate {
    /// First completed lecture for this course; a progress record was opened.
    Created,
    Updated,
    AlreadyCompleted,
}

impl ProgressUpdate {
    pub fn message(&self) -> &'static str {
        match self {
            ProgressUpdate::Created => "Course progress created and updated successfully",
            ProgressUpdate::Updated => "Course progress updated successfully",
            ProgressUpdate::AlreadyCompleted => "Subsection already completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress() -> CourseProgress {
        CourseProgress::empty(UserId::new("u1").unwrap(), CourseId::new("c1").unwrap())
    }

    #[test]
    fn completing_twice_keeps_one_entry() {
        let mut p = progress();
        let lecture = SubSectionId::new("s1").unwrap();
        assert_eq!(p.complete(lecture.clone()), MembershipChange::Added);
        assert_eq!(p.complete(lecture.clone()), MembershipChange::AlreadyPresent);
        assert_eq!(p.completed_videos, vec![lecture]);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(progress()).unwrap();
        assert!(json.get("completedVideos").is_some());
        assert_eq!(json["courseId"], "c1");
    }
}
