use sayboard_bridge::project::NewProject;

use crate::form::{Draft, FormError};

/// Draft of a new project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    /// May stay empty; the server then derives the slug from the name.
    pub slug: String,
}

impl Draft for ProjectDraft {
    type Request = NewProject;
    type Context = ();

    fn to_request(&self, _: &()) -> Result<NewProject, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Empty { field: "name" });
        }
        if name.chars().count() <= 2 {
            return Err(FormError::NameTooShort);
        }

        Ok(NewProject {
            name: name.to_owned(),
            slug: self.slug.trim().to_owned(),
        })
    }

    fn reset_after_success(&mut self) {
        self.name.clear();
        self.slug.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn draft(name: &str, slug: &str) -> ProjectDraft {
        ProjectDraft {
            name: name.to_owned(),
            slug: slug.to_owned(),
        }
    }

    #[test]
    fn short_names_are_refused() {
        assert_eq!(draft("ab", "").to_request(&()), Err(FormError::NameTooShort));
        assert_eq!(
            draft("  ", "").to_request(&()),
            Err(FormError::Empty { field: "name" })
        );
    }

    #[test]
    fn empty_slug_is_allowed() {
        assert_eq!(
            draft(" Museum guide ", "").to_request(&()),
            Ok(NewProject {
                name: "Museum guide".to_owned(),
                slug: String::new(),
            })
        );
    }

    #[test]
    fn non_ascii_names_count_characters() {
        assert_eq!(draft("дом", "").to_request(&()).map(|p| p.name), Ok("дом".to_owned()));
    }
}
