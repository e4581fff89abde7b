//! Members of a target: plain values, callables and installed operations.
//!
//! Callables are reference-counted closures, so cloning a [`Method`] or an
//! [`AsyncMethod`] shares the same function. Composition captures the current
//! callable by cloning it into the closure of the new one.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture};
use futures::FutureExt;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::completion::Completion;
use crate::config::NamingStyle;
use crate::error::AdviceResult;

type MethodFn = dyn Fn(&[Value]) -> AdviceResult<Value> + Send + Sync;
type AsyncMethodFn = dyn Fn(Vec<Value>) -> BoxFuture<'static, Completion> + Send + Sync;

/// A synchronous method taking positional arguments.
#[derive(Clone)]
pub struct Method(Arc<MethodFn>);

impl Method {
    /// Create a method from a closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> AdviceResult<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the method
    pub fn call(&self, args: &[Value]) -> AdviceResult<Value> {
        (self.0)(args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Method(..)")
    }
}

/// An asynchronous method that reports its outcome as a [`Completion`].
#[derive(Clone)]
pub struct AsyncMethod(Arc<AsyncMethodFn>);

impl AsyncMethod {
    /// Create an asynchronous method from a closure returning a future
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Completion> + Send + 'static,
    {
        Self(Arc::new(move |args| f(args).boxed()))
    }

    /// Create an asynchronous method from an error-first callback body.
    ///
    /// The body runs as soon as the method is called and reports through the
    /// [`Callback`] it receives. A body that drops its callback without
    /// calling it leaves the completion pending forever.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use advice_core::{AsyncMethod, Completion};
    /// use serde_json::json;
    ///
    /// let echo = AsyncMethod::from_callback(|args, done| {
    ///     done.done(Completion::ok(args));
    /// });
    ///
    /// let completion = futures::executor::block_on(echo.call(vec![json!("hi")]));
    /// assert_eq!(completion.first(), Some(&json!("hi")));
    /// ```
    pub fn from_callback<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>, Callback) + Send + Sync + 'static,
    {
        Self(Arc::new(move |args| {
            let (sender, receiver) = oneshot::channel();
            f(args, Callback { sender });
            async move {
                match receiver.await {
                    Ok(completion) => completion,
                    Err(_) => future::pending().await,
                }
            }
            .boxed()
        }))
    }

    /// Invoke the method, returning its pending completion
    pub fn call(&self, args: Vec<Value>) -> BoxFuture<'static, Completion> {
        (self.0)(args)
    }
}

impl fmt::Debug for AsyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncMethod(..)")
    }
}

/// One-shot completion handle handed to callback-style bodies
#[derive(Debug)]
pub struct Callback {
    sender: oneshot::Sender<Completion>,
}

impl Callback {
    /// Report the outcome of the call
    pub fn done(self, completion: Completion) {
        // The caller may have stopped waiting; nothing to report to then.
        let _ = self.sender.send(completion);
    }
}

/// The five registration operations installed by the mixin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Run an interceptor before the base
    Before,
    /// Run an interceptor after the base
    After,
    /// Hand the base to an interceptor that controls it
    Around,
    /// Run an asynchronous pre-check that may short-circuit the base
    HijackBefore,
    /// Run an asynchronous post-step on the call's arguments and the base's completion
    HijackAfter,
}

impl Operation {
    /// All operations, in installation order
    pub const ALL: [Operation; 5] = [
        Operation::Before,
        Operation::After,
        Operation::Around,
        Operation::HijackBefore,
        Operation::HijackAfter,
    ];

    /// Member name of this operation under the given naming style
    pub fn name(self, style: NamingStyle) -> &'static str {
        match (self, style) {
            (Operation::Before, _) => "before",
            (Operation::After, _) => "after",
            (Operation::Around, _) => "around",
            (Operation::HijackBefore, NamingStyle::Snake) => "hijack_before",
            (Operation::HijackBefore, NamingStyle::Camel) => "hijackBefore",
            (Operation::HijackAfter, NamingStyle::Snake) => "hijack_after",
            (Operation::HijackAfter, NamingStyle::Camel) => "hijackAfter",
        }
    }
}

/// What a name on a target is bound to
#[derive(Debug, Clone)]
pub enum Member {
    /// A plain, non-callable property
    Value(Value),
    /// A synchronous method
    Method(Method),
    /// An asynchronous, completion-style method
    AsyncMethod(AsyncMethod),
    /// A registration operation installed by the mixin
    Operation(Operation),
}

impl Member {
    /// Short description of the member kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Member::Value(_) => "value",
            Member::Method(_) => "method",
            Member::AsyncMethod(_) => "async method",
            Member::Operation(_) => "operation",
        }
    }
}

impl From<Value> for Member {
    fn from(value: Value) -> Self {
        Member::Value(value)
    }
}

impl From<Method> for Member {
    fn from(method: Method) -> Self {
        Member::Method(method)
    }
}

impl From<AsyncMethod> for Member {
    fn from(method: AsyncMethod) -> Self {
        Member::AsyncMethod(method)
    }
}
