//! Shared helpers.

pub mod member_path;

pub use member_path::MemberPath;
