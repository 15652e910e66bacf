//! Generic form controller shared by every modal form.
//!
//! A form owns a draft and walks `Idle → Editing → Submitting`, returning to
//! `Idle` on success and to `Editing` on any failure. The draft decides what
//! is valid and what request it turns into (see [`Draft`]).

use sayboard_bridge::{error::ApiError, notification::NotificationType};

use crate::feedback::{Feedback, NO_CHANGES};

/// Local validation failures. None of them ever reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Fill in this field")]
    Empty { field: &'static str },
    #[error("Name must not contain spaces or '/'")]
    InvalidName,
    #[error("Name must be longer than two characters")]
    NameTooShort,
    #[error("Source {0:?} is unknown. Reload the sources and try again")]
    UnknownSource(String),
    #[error("Choose a voice")]
    MissingVoice,
    #[error("Fill in actor voice")]
    MissingActor,
    #[error("Speed must be a positive number")]
    InvalidSpeed,
    #[error("{}", NO_CHANGES)]
    NoChanges,
    #[error("Choose at least one file")]
    NoFiles,
    #[error("The previous request is still in progress")]
    AlreadySubmitting,
}

impl FormError {
    /// Field the error belongs to, `None` for form-wide errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Empty { field } => Some(*field),
            Self::InvalidName | Self::NameTooShort => Some("name"),
            Self::MissingVoice | Self::MissingActor => Some("voice"),
            Self::InvalidSpeed => Some("speed"),
            Self::NoFiles => Some("files"),
            Self::UnknownSource(_) | Self::NoChanges | Self::AlreadySubmitting => None,
        }
    }
}

/// Editable state behind a form.
pub trait Draft {
    /// What a valid draft turns into.
    type Request;
    /// Shared state the draft needs to validate itself.
    type Context: ?Sized;

    fn to_request(&self, cx: &Self::Context) -> Result<Self::Request, FormError>;

    /// Called after the server accepted the request.
    fn reset_after_success(&mut self) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Editing,
    Submitting,
}

/// Messages shown inside a form: an optional banner plus per-field text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub common: Option<Feedback>,
    fields: Vec<(String, String)>,
}

impl FormErrors {
    pub fn clear(&mut self) {
        self.common = None;
        self.fields.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.common.is_none() && self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, message)| message.as_str())
    }

    fn set_field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = message,
            None => self.fields.push((field, message)),
        }
    }

    fn apply_local(&mut self, error: &FormError) {
        match (error, error.field()) {
            (FormError::NoChanges, _) => {
                self.common = Some(Feedback::new(NotificationType::Warning, NO_CHANGES));
            }
            (_, Some(field)) => self.set_field(field, error.to_string()),
            (_, None) => {
                self.common = Some(Feedback::new(NotificationType::Warning, error.to_string()));
            }
        }
    }

    fn apply_api(&mut self, error: &ApiError) {
        if let ApiError::Rejected { messages, .. } = error {
            for message in messages {
                if let Some(field) = &message.field {
                    self.set_field(field.as_str(), message.message.as_str());
                }
            }
        }
        self.common = Some(Feedback::for_api_error(error));
    }
}

/// Drives one modal form through its phases.
#[derive(Debug, Clone, Default)]
pub struct FormController<D> {
    draft: D,
    phase: FormPhase,
    errors: FormErrors,
}

impl<D: Draft> FormController<D> {
    pub fn new(draft: D) -> Self {
        Self {
            draft,
            phase: FormPhase::Idle,
            errors: FormErrors::default(),
        }
    }

    /// Opens the form with a fresh draft.
    pub fn open(&mut self, draft: D) {
        self.draft = draft;
        self.reopen();
    }

    /// Opens the form keeping the current draft.
    pub fn reopen(&mut self) {
        self.phase = FormPhase::Editing;
        self.errors.clear();
    }

    /// Closes the form. A form with a request in flight stays open so the
    /// answer can still be applied; returns whether the form closed.
    pub fn close(&mut self) -> bool {
        if self.phase == FormPhase::Submitting {
            return false;
        }
        self.phase = FormPhase::Idle;
        true
    }

    /// Validates the draft and moves to `Submitting`.
    ///
    /// A form already waiting for the server refuses the call, which keeps
    /// double clicks from sending the request twice.
    pub fn submit(&mut self, cx: &D::Context) -> Result<D::Request, FormError> {
        if self.phase == FormPhase::Submitting {
            return Err(FormError::AlreadySubmitting);
        }

        self.errors.clear();
        match self.draft.to_request(cx) {
            Ok(request) => {
                self.phase = FormPhase::Submitting;
                Ok(request)
            }
            Err(error) => {
                self.errors.apply_local(&error);
                self.phase = FormPhase::Editing;
                Err(error)
            }
        }
    }

    /// The server accepted the request: close the form and reset the draft.
    pub fn succeed(&mut self) {
        self.draft.reset_after_success();
        self.errors.clear();
        self.phase = FormPhase::Idle;
    }

    /// The server refused the request: back to editing with messages.
    pub fn fail(&mut self, error: &ApiError) {
        self.errors.apply_api(error);
        self.phase = FormPhase::Editing;
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Idle
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }
}
