//! Core domain models for manifests
//!
//! This module defines the data structures a manifest decodes into:
//! pipelines, their steps and conditions, and the secret and signature
//! documents that travel alongside them.

pub mod condition;
pub mod pipeline;
pub mod resource;
pub mod step;
pub mod variable;

pub use condition::*;
pub use pipeline::*;
pub use resource::*;
pub use step::*;
pub use variable::*;
