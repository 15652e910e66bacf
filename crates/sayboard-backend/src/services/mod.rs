//! Backend service handlers for frontend-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, perform side effects (network, filesystem), and answer every
//! command with exactly one result message back to the frontend.

pub mod config_service;
pub mod import_service;
pub mod project_service;
pub mod record_service;
pub mod source_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;
