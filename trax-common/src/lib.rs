//! Shared types for the trax services
//!
//! Holds the wire-level data model of the processing pipeline
//! (file records and transcript segments), the common error type,
//! and configuration file helpers used by both the presentation
//! gateway and the mock upstream.

pub mod config;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{FileRecord, ProcessingStatus, Segment};
