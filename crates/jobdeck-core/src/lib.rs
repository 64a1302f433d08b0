//! Core domain types for the jobdeck dashboard service.
//!
//! This crate contains:
//! - Job and build identifiers
//! - Job, build and build status types
//! - The three pointer builds tracked per job
//! - Dashboard types handed to the presentation layer

pub mod build;
pub mod dashboard;
pub mod error;
pub mod id;
pub mod job;

pub use build::{Build, BuildStatus};
pub use dashboard::{Dashboard, DashboardJob};
pub use error::{Error, Result};
pub use id::{BuildId, JobId};
pub use job::{Job, PointerBuild};
