//! SIV Core - snapshot model and diff engine for the system integrity verifier
//!
//! This crate provides the batch snapshot/verify pipeline:
//! - MD5/SHA-1 content digests
//! - Canonical metadata records and deterministic tree walking
//! - Verification-file serialization and parsing
//! - Reconciliation of a baseline against a fresh scan
//! - Report rendering

pub mod diff;
pub mod digest;
pub mod error;
pub mod ops;
pub mod record;
pub mod report;
pub mod snapshot;
pub mod walk;

// Re-export main types for convenience
pub use diff::{ChangedEntry, DriftReport, FieldDelta, FieldKind};
pub use digest::{digest_bytes, digest_file, HashAlgorithm};
pub use error::{Result, SivError};
pub use ops::{initialize, verify, InitOptions, InitSummary, VerifyOptions, VerifySummary};
pub use record::{build_record, Record, DIRECTORY_SENTINEL};
pub use report::Report;
pub use snapshot::{MalformedLine, Snapshot};
pub use walk::{scan_tree, RecordSet, WalkedTree};
