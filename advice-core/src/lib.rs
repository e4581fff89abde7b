//! # Advice Core Library
//!
//! `advice-core` lets the methods of a target object be intercepted and
//! extended at runtime without touching the methods themselves. Behavior can
//! run before a method, after it, around it, or gate an asynchronous method
//! on an asynchronous pre- or post-check.
//!
//! ## Features
//!
//! - **Mixin application**: [`mixin`] installs the five registration operations on a [`Target`]
//! - **Synchronous advice**: [`Advice::before`], [`Advice::after`] and [`Advice::around`]
//! - **Asynchronous hijacks**: [`Advice::hijack_before`] and [`Advice::hijack_after`] over
//!   error-first [`Completion`]s, with optional short-circuit on error
//! - **Callback bridge**: [`AsyncMethod::from_callback`] adapts error-first callback bodies
//! - **Configuration**: [`AdviceConfig`] loaded from JSON, YAML or TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use advice_core::{Advice, Target};
//! use serde_json::{json, Value};
//!
//! let mut target = Target::new()
//!     .with_method("fn", |args: &[Value]| {
//!         Ok(json!(format!("{}original", args[0].as_str().unwrap_or_default())))
//!     })
//!     .advised();
//!
//! target.around("fn", |base, args| {
//!     let input = format!("{}ar", args[0].as_str().unwrap_or_default());
//!     let output = base.call(&[json!(input)])?;
//!     Ok(json!(format!("{}ound", output.as_str().unwrap_or_default())))
//! })?;
//!
//! assert_eq!(target.call("fn", &[json!("vide")])?, json!("videaroriginalound"));
//! # Ok::<(), advice_core::AdviceError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`error`]: error types for registration and invocation
//! - [`completion`]: error-first results of asynchronous methods
//! - [`member`]: methods, asynchronous methods and the operation markers
//! - [`target`]: the member table that registrations rewrite
//! - [`advice`]: the mixin and the composition rules
//! - [`config`]: per-target configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]

pub mod advice;
pub mod completion;
pub mod config;
pub mod error;
pub mod member;
pub mod target;

// Re-export commonly used types for convenience
pub use advice::{mixin, Advice};
pub use completion::{is_truthy, Completion};
pub use config::{AdviceConfig, NamingStyle};
pub use error::{AdviceError, AdviceResult, ConfigError};
pub use member::{AsyncMethod, Callback, Member, Method, Operation};
pub use serde_json::Value;
pub use target::Target;

/// Current version of the advice-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
