//! Courses within a program.

use campus_core::CourseId;
use serde::{Deserialize, Serialize};

/// A single course offered as part of a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course ID.
    id: CourseId,
    /// Course name.
    name: String,
    /// Course description.
    description: Option<String>,
}

impl Course {
    /// Creates a new course.
    #[must_use]
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: CourseId::new(),
            name,
            description,
        }
    }

    /// Creates a course with all fields specified, for reconstitution
    /// from storage.
    #[must_use]
    pub fn with_id(id: CourseId, name: String, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    /// Returns the course's ID.
    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Returns the course name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the course description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
