//! # webext-compat
//!
//! Compatibility resolution and invocation bridging for browser extension APIs.
//!
//! ## Overview
//!
//! Extension runtimes disagree on three things: whether asynchronous natives
//! take a completion callback or return a deferred result, how members are
//! addressed in the API namespace, and which members exist at which runtime
//! version. This crate puts one uniform call surface in front of all of them.
//! For every call it decides whether the member exists and is safe to invoke,
//! then either invokes it or fails with an exact, reproducible message.
//!
//! The engine never implements a capability itself. It reads two inputs: a
//! support descriptor (which runtime shipped what, and when) and the live
//! namespace graph owned by the host.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use serde_json::json;
//! use webext_compat::{InvocationBridge, RuntimeIdentity, StaticNamespace, SupportDescriptor};
//!
//! #[tokio::main]
//! async fn main() -> webext_compat::Result<()> {
//!     let descriptor = SupportDescriptor::from_json_str(r#"{
//!         "tabs": { "query": { "__compat": { "support": {
//!             "chrome": { "version_added": "20" }
//!         } } } }
//!     }"#)?;
//!
//!     let ns = StaticNamespace::new();
//!     ns.insert_function("tabs.query", |args| {
//!         args.complete(vec![json!([{ "id": 1 }])]);
//!         Ok(json!(null).into())
//!     });
//!
//!     let runtime = RuntimeIdentity::builder("chrome")
//!         .version("120")
//!         .namespace(ns.into_arc())
//!         .build();
//!
//!     let tabs = InvocationBridge::new("tabs", Arc::new(descriptor), runtime);
//!     let found = tabs.deferred_call("query", vec![json!({ "active": true })]).await?;
//!     println!("{found}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`descriptor`] | Support descriptor loading, validation and lookup |
//! | [`version`] | Dotted version comparison |
//! | [`resolver`] | Member support resolution and diagnostics |
//! | [`bridge`] | `call` / `deferred_call` / `read_property` |
//! | [`events`] | Listener proxies, event facades and declarative rules |
//! | [`namespace`] | Host boundary: the live graph, natives and listeners |
//! | [`runtime`] | Runtime identity |
//! | [`bootstrap`] | Optional user-agent runtime detection |
//! | [`config`] | Bridge configuration |

pub mod bootstrap;
pub mod bridge;
pub mod config;
pub mod descriptor;
pub mod events;
pub mod namespace;
pub mod resolver;
pub mod runtime;
pub mod utils;
pub mod version;

// Re-export main types for convenience
pub use bridge::{Availability, Deferred, InvocationBridge};
pub use config::BridgeConfig;
pub use descriptor::{DescriptorLoader, SupportDescriptor};
pub use events::{DeclarativeEventFacade, EventFacade, ListenerProxy, Rule, RuleValidator, VariantRuleValidator};
pub use namespace::{
    Completion, EventListeners, Listener, ListenerTarget, Member, Namespace, NativeArgs, NativeError,
    NativeFunction, NativeReturn, StaticNamespace,
};
pub use resolver::{AddressingMode, Diagnostic, SupportResolver};
pub use runtime::RuntimeIdentity;
pub use version::VersionComparator;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
