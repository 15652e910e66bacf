//! Client-side state of the application, free of any UI toolkit.
//!
//! Everything the pages show lives in a [`session::Session`]: the source
//! catalog loaded at startup, optimistic mirrors of the record and project
//! lists, paging state of both tables and the modal forms. The frontend owns
//! exactly one session and re-renders whenever it changes.

pub mod catalog;
pub mod feedback;
pub mod form;
pub mod import_form;
pub mod list;
pub mod project_form;
pub mod record_form;
pub mod session;
pub mod table;
