//! Workflow Definition Module
//!
//! Provides the manifest data model, the built-in planet template and the
//! expansion that instantiates it for every region.
//!
//! # Structure
//!
//! - [`model`]: Core data structures (Workflow, Step, Task)
//! - [`template`]: The prototype workflow and default regions
//! - [`parameterize`]: Per-region task substitution
//! - [`expander`]: Template expansion over a region list
//! - [`validator`]: Structural checks on prototype workflows

pub mod expander;
pub mod model;
pub mod parameterize;
pub mod template;
pub mod validator;

pub use expander::expand;
pub use model::{Step, Task, Workflow};
pub use parameterize::{parameterize, RegionTask};
pub use template::Template;
pub use validator::validate_workflow;
