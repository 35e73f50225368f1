//! Support descriptor layer: loading, validating and querying the document
//! that records which runtimes implement which extension API members.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`support`] | Descriptor structure and per-runtime support statements |
//! | [`loader`] | Loading from JSON/YAML files |
//! | [`validator`] | JSON Schema validation of raw documents |
//! | [`error`] | Descriptor-specific error types |

pub mod error;
pub mod loader;
pub mod support;
pub mod validator;

pub use error::DescriptorError;
pub use loader::{DescriptorLoader, DESCRIPTOR_ENV};
pub use support::{
    CompatBlock, CompatStatus, SupportDescriptor, SupportEntry, SupportStatement, VersionAdded,
    COMPAT_KEY,
};
pub use validator::DescriptorValidator;
