//! Target objects: named member tables whose method slots can be rewritten.

use std::collections::HashMap;

use futures::future::BoxFuture;
use serde_json::Value;
use tracing::trace;

use crate::completion::Completion;
use crate::config::AdviceConfig;
use crate::error::{AdviceError, AdviceResult};
use crate::member::{AsyncMethod, Member, Method};

/// An object owning a mapping from member name to [`Member`].
///
/// A target starts out as a plain member table. Applying
/// [`mixin`](crate::mixin) installs the registration operations, after which
/// the methods of the target can be intercepted through the
/// [`Advice`](crate::Advice) trait.
///
/// # Examples
///
/// ```rust
/// use advice_core::{Advice, Target};
/// use serde_json::{json, Value};
///
/// let mut target = Target::new()
///     .with_method("greet", |args: &[Value]| {
///         Ok(json!(format!("hello {}", args[0].as_str().unwrap_or("?"))))
///     })
///     .advised();
///
/// target.after("greet", |_args: &[Value]| Ok(())).unwrap();
/// assert_eq!(target.call("greet", &[json!("bob")]).unwrap(), json!("hello bob"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Target {
    members: HashMap<String, Member>,
    config: AdviceConfig,
}

impl Target {
    /// Create an empty target with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty target with the given configuration
    pub fn with_config(config: AdviceConfig) -> Self {
        Self {
            members: HashMap::new(),
            config,
        }
    }

    /// Configuration of this target
    pub fn config(&self) -> &AdviceConfig {
        &self.config
    }

    /// Add a synchronous method
    pub fn with_method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> AdviceResult<Value> + Send + Sync + 'static,
    {
        self.insert(name, Method::new(f));
        self
    }

    /// Add an asynchronous method
    pub fn with_async_method(mut self, name: impl Into<String>, method: AsyncMethod) -> Self {
        self.insert(name, method);
        self
    }

    /// Add a plain value
    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    /// Apply the mixin and return the target
    pub fn advised(mut self) -> Self {
        crate::advice::mixin(&mut self);
        self
    }

    /// Bind a member to a name, returning the member it replaced
    pub fn insert(&mut self, name: impl Into<String>, member: impl Into<Member>) -> Option<Member> {
        self.members.insert(name.into(), member.into())
    }

    /// Member bound to a name
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Whether a member is bound to a name
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// All member names, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.members.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the target has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Resolve the synchronous method currently bound to a name
    pub fn method(&self, name: &str) -> AdviceResult<Method> {
        match self.members.get(name) {
            Some(Member::Method(method)) => Ok(method.clone()),
            Some(other) => Err(AdviceError::NotCallable {
                method: name.to_string(),
                expected: "method",
                found: other.kind(),
            }),
            None => Err(AdviceError::lookup(name)),
        }
    }

    /// Resolve the asynchronous method currently bound to a name
    pub fn async_method(&self, name: &str) -> AdviceResult<AsyncMethod> {
        match self.members.get(name) {
            Some(Member::AsyncMethod(method)) => Ok(method.clone()),
            Some(other) => Err(AdviceError::NotCallable {
                method: name.to_string(),
                expected: "async method",
                found: other.kind(),
            }),
            None => Err(AdviceError::lookup(name)),
        }
    }

    /// Call a synchronous method by name
    pub fn call(&self, name: &str, args: &[Value]) -> AdviceResult<Value> {
        let method = self.method(name)?;
        if self.config.trace_calls {
            trace!(method = name, args = args.len(), "calling method");
        }
        method.call(args)
    }

    /// Call an asynchronous method by name, returning its pending completion
    pub fn call_async(
        &self,
        name: &str,
        args: Vec<Value>,
    ) -> AdviceResult<BoxFuture<'static, Completion>> {
        let method = self.async_method(name)?;
        if self.config.trace_calls {
            trace!(method = name, args = args.len(), "calling async method");
        }
        Ok(method.call(args))
    }
}
