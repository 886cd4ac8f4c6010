//! Programs: the top-level catalog entity.
//!
//! A program owns its courses and carries a set of tags. Tag handling
//! follows reconciliation semantics: incoming tag references are matched
//! against the shared tag catalog by ID or title, updated in place when
//! matched, and added without duplication.

use campus_core::{ProgramId, UserId};
use serde::{Deserialize, Serialize};

use crate::course::Course;
use crate::tag::{Tag, TagInput};

/// A program of study owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Unique program ID.
    id: ProgramId,
    /// Program name.
    name: String,
    /// Free-form program type, e.g. "after-school".
    program_type: Option<String>,
    /// Program description.
    description: Option<String>,
    /// The user who owns this program.
    owner: UserId,
    /// Tags attached to this program. No tag appears twice.
    tags: Vec<Tag>,
    /// Courses offered under this program.
    courses: Vec<Course>,
}

impl Program {
    /// Creates a new program owned by the given user.
    #[must_use]
    pub fn new(name: String, owner: UserId) -> Self {
        Self {
            id: ProgramId::new(),
            name,
            program_type: None,
            description: None,
            owner,
            tags: Vec::new(),
            courses: Vec::new(),
        }
    }

    /// Creates a program with all fields specified, for reconstitution
    /// from storage.
    #[must_use]
    #[expect(clippy::too_many_arguments)]
    pub fn with_all_fields(
        id: ProgramId,
        name: String,
        program_type: Option<String>,
        description: Option<String>,
        owner: UserId,
        tags: Vec<Tag>,
        courses: Vec<Course>,
    ) -> Self {
        Self {
            id,
            name,
            program_type,
            description,
            owner,
            tags,
            courses,
        }
    }

    /// Returns the program's ID.
    #[must_use]
    pub fn id(&self) -> ProgramId {
        self.id
    }

    /// Returns the program name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the program type, if set.
    #[must_use]
    pub fn program_type(&self) -> Option<&str> {
        self.program_type.as_deref()
    }

    /// Returns the description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning user's ID.
    #[must_use]
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the attached tags.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the program's courses.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Sets the program type.
    pub fn set_program_type(&mut self, program_type: Option<String>) {
        self.program_type = program_type;
    }

    /// Sets the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Returns true if a tag with this ID is already attached.
    #[must_use]
    pub fn contains_tag(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t.id() == tag.id())
    }

    /// Attaches a tag unless already present.
    pub fn add_tag(&mut self, tag: Tag) {
        if !self.contains_tag(&tag) {
            self.tags.push(tag);
        }
    }

    /// Adds a course to the program.
    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    /// Reconciles incoming tag references against the shared catalog.
    ///
    /// Each input is matched against the catalog by ID when one is
    /// given, otherwise by title. A match is patched with the input's
    /// provided fields and attached if not already present; a miss
    /// becomes a brand new tag. Returns the tags that did not exist in
    /// the catalog so the caller can persist them.
    pub fn reconcile_tags(&mut self, inputs: &[TagInput], catalog: &[Tag]) -> Vec<Tag> {
        let mut created = Vec::new();

        for input in inputs {
            let existing = match input.id {
                Some(id) => catalog.iter().find(|t| t.id() == id),
                None => input
                    .title
                    .as_deref()
                    .and_then(|title| catalog.iter().find(|t| t.title().eq_ignore_ascii_case(title))),
            };

            match existing {
                Some(tag) => {
                    let mut tag = tag.clone();
                    tag.apply(input);
                    if let Some(attached) = self.tags.iter_mut().find(|t| t.id() == tag.id()) {
                        *attached = tag;
                    } else {
                        self.tags.push(tag);
                    }
                }
                None => {
                    let Some(title) = input.title.clone() else {
                        // Reference by unknown ID with no title; nothing
                        // to create, skip it.
                        continue;
                    };
                    let tag = Tag::new(title, input.hex_code.clone());
                    created.push(tag.clone());
                    self.add_tag(tag);
                }
            }
        }

        created
    }

    /// Applies a partial update: provided fields overwrite, absent
    /// fields are left alone.
    pub fn patch(
        &mut self,
        name: Option<String>,
        program_type: Option<String>,
        description: Option<String>,
    ) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(program_type) = program_type {
            self.program_type = Some(program_type);
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
    }
}
