//! Manifest Module
//!
//! Turns an expanded workflow into the documents handed to the executor.
//!
//! # Structure
//!
//! - [`partition`]: Splits a workflow into standalone single-step manifests
//! - [`writer`]: JSON encoding and document persistence

pub mod partition;
pub mod writer;

pub use partition::{partition, StepManifest};
pub use writer::{encode, DocumentStore, FsStore, ManifestWriter, MemoryStore};
