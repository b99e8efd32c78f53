//! Audit logging
//!
//! Records every successful course and enrollment mutation with before/after
//! values in an append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: one committed change, with its `AuditSubject` (course or
//!   enrollment keys) and the record before and after.
//! - `AuditLogger`: appends entries to the log file as line-delimited JSON.
//! - `generate_diff`: summarizes top-level field changes for updates.
//!
//! Failed operations are never logged. An append that fails after the
//! change was saved becomes a warning on `Storage`, not an error.

mod diff;
mod entry;
mod logger;

pub use entry::{AuditEntry, AuditSubject, Operation};
pub use logger::AuditLogger;
