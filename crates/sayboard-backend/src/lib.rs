//! Backend runtime entry point and public API surface.
//!
//! This crate owns the backend lifecycle, routes bridge messages to services
//! that talk to the content-management server, and manages shared state used
//! by asynchronous tasks.

mod api;
mod app;
mod config;
mod runtime;
mod services;
mod state;

pub use crate::runtime::run;
