//! In-memory store adapters.
//!
//! Back the store ports with `HashMap`s behind `tokio::sync::RwLock`. Used by
//! tests and by local runs without a database.

mod course_catalog;
mod enrollment_journal;
mod progress_repository;
mod student_directory;

pub use course_catalog::InMemoryCourseCatalog;
pub use enrollment_journal::InMemoryEnrollmentJournal;
pub use progress_repository::InMemoryProgressRepository;
pub use student_directory::InMemoryStudentDirectory;
