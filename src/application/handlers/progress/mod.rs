//! Course progress handlers.

mod get_course_progress;
mod update_course_progress;

pub use get_course_progress::{GetCourseProgressHandler, GetCourseProgressQuery};
pub use update_course_progress::{
    UpdateCourseProgressCommand, UpdateCourseProgressHandler, UpdateCourseProgressResult,
};
