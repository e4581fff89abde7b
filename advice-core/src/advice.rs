//! The advice mixin and its five registration operations.
//!
//! Each registration resolves the callable currently bound to a name (the
//! *base*), builds a composed callable that closes over the base and the
//! interceptor, and writes the composed callable back into the same slot.
//! Nothing else records the registration: a chain of interceptors exists only
//! as closures nested inside the slot's current callable, so registrations
//! cannot be listed or removed.
//!
//! Ordering follows from the nesting. Every new wrap becomes the outermost
//! layer, so the most recently registered `before` runs first, the most
//! recently registered `after` runs last, and the most recently registered
//! `around` decides whether anything underneath runs at all.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::completion::Completion;
use crate::error::{AdviceError, AdviceResult};
use crate::member::{AsyncMethod, Member, Method, Operation};
use crate::target::Target;

/// Install the five registration operations on a target.
///
/// Only the operation members are added; every other member is left as it
/// was, so calls behave exactly as before until something is registered.
/// Applying the mixin twice re-installs the same operations and keeps all
/// existing interceptor chains, since those live in the method slots.
pub fn mixin(target: &mut Target) {
    let style = target.config().naming;
    for operation in Operation::ALL {
        let name = operation.name(style);
        target.insert(name, Member::Operation(operation));
        debug!(operation = name, "installed advice operation");
    }
}

/// Registration operations available on an advised target.
///
/// Every operation fails with [`AdviceError::NotAdvised`] if the mixin was
/// not applied, with [`AdviceError::Lookup`] if nothing is bound to `method`,
/// and with [`AdviceError::NotCallable`] if the member is not a callable of
/// the kind the operation wraps: `before`, `after` and `around` wrap
/// synchronous [`Method`]s, the hijack operations wrap [`AsyncMethod`]s.
pub trait Advice {
    /// Run `interceptor` with the call's arguments before the base.
    ///
    /// An error from the interceptor aborts the call; the base does not run.
    /// The call returns whatever the base returns.
    fn before<F>(&mut self, method: &str, interceptor: F) -> AdviceResult<()>
    where
        F: Fn(&[Value]) -> AdviceResult<()> + Send + Sync + 'static;

    /// Run `interceptor` with the call's arguments after the base.
    ///
    /// The interceptor sees the original arguments, not the base's result, and
    /// the call still returns the base's result. If the base fails the
    /// interceptor does not run.
    fn after<F>(&mut self, method: &str, interceptor: F) -> AdviceResult<()>
    where
        F: Fn(&[Value]) -> AdviceResult<()> + Send + Sync + 'static;

    /// Replace the method with `interceptor`, which receives the base as its
    /// first argument and decides if, when and how to call it.
    fn around<F>(&mut self, method: &str, interceptor: F) -> AdviceResult<()>
    where
        F: Fn(&Method, &[Value]) -> AdviceResult<Value> + Send + Sync + 'static;

    /// Run the asynchronous `hijack` before the base.
    ///
    /// The hijack receives the call's arguments. When it completes with an
    /// error and `stop_on_error` is set, its completion becomes the result
    /// and the base never runs. Otherwise the base runs with the original
    /// arguments and its completion is the result.
    fn hijack_before<F, Fut>(&mut self, method: &str, hijack: F, stop_on_error: bool) -> AdviceResult<()>
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Completion> + Send + 'static;

    /// Run the asynchronous `hijack` after the base.
    ///
    /// When the base completes with an error and `stop_on_error` is set, the
    /// hijack is skipped and the base's completion is the result. Otherwise
    /// the hijack receives the call's original arguments together with
    /// exactly what the base completed with, and its own completion is the
    /// result.
    fn hijack_after<F, Fut>(&mut self, method: &str, hijack: F, stop_on_error: bool) -> AdviceResult<()>
    where
        F: Fn(Vec<Value>, Completion) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Completion> + Send + 'static;
}

impl Advice for Target {
    fn before<F>(&mut self, method: &str, interceptor: F) -> AdviceResult<()>
    where
        F: Fn(&[Value]) -> AdviceResult<()> + Send + Sync + 'static,
    {
        wrap_method(self, Operation::Before, method, move |base| {
            Method::new(move |args| {
                interceptor(args)?;
                base.call(args)
            })
        })
    }

    fn after<F>(&mut self, method: &str, interceptor: F) -> AdviceResult<()>
    where
        F: Fn(&[Value]) -> AdviceResult<()> + Send + Sync + 'static,
    {
        wrap_method(self, Operation::After, method, move |base| {
            Method::new(move |args| {
                let result = base.call(args)?;
                interceptor(args)?;
                Ok(result)
            })
        })
    }

    fn around<F>(&mut self, method: &str, interceptor: F) -> AdviceResult<()>
    where
        F: Fn(&Method, &[Value]) -> AdviceResult<Value> + Send + Sync + 'static,
    {
        wrap_method(self, Operation::Around, method, move |base| {
            Method::new(move |args| interceptor(&base, args))
        })
    }

    fn hijack_before<F, Fut>(&mut self, method: &str, hijack: F, stop_on_error: bool) -> AdviceResult<()>
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Completion> + Send + 'static,
    {
        let name = method.to_string();
        wrap_async_method(self, Operation::HijackBefore, method, move |base| {
            AsyncMethod::new(move |args: Vec<Value>| {
                let checked = hijack(args.clone());
                let base = base.clone();
                let name = name.clone();
                async move {
                    let completion = checked.await;
                    if stop_on_error && completion.is_err() {
                        debug!(method = %name, "hijack failed, skipping base");
                        return completion;
                    }
                    base.call(args).await
                }
            })
        })
    }

    fn hijack_after<F, Fut>(&mut self, method: &str, hijack: F, stop_on_error: bool) -> AdviceResult<()>
    where
        F: Fn(Vec<Value>, Completion) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Completion> + Send + 'static,
    {
        let name = method.to_string();
        let hijack = Arc::new(hijack);
        wrap_async_method(self, Operation::HijackAfter, method, move |base| {
            AsyncMethod::new(move |args: Vec<Value>| {
                let pending = base.call(args.clone());
                let hijack = Arc::clone(&hijack);
                let name = name.clone();
                async move {
                    let completion = pending.await;
                    if stop_on_error && completion.is_err() {
                        debug!(method = %name, "base failed, skipping hijack");
                        return completion;
                    }
                    (*hijack)(args, completion).await
                }
            })
        })
    }
}

/// Fail unless the mixin installed `operation` on the target.
fn ensure_installed(target: &Target, operation: Operation) -> AdviceResult<()> {
    let name = operation.name(target.config().naming);
    match target.get(name) {
        Some(Member::Operation(installed)) if *installed == operation => Ok(()),
        _ => Err(AdviceError::NotAdvised {
            operation: name.to_string(),
        }),
    }
}

/// Resolve a synchronous base, wrap it and write the result back.
fn wrap_method<W>(target: &mut Target, operation: Operation, method: &str, wrap: W) -> AdviceResult<()>
where
    W: FnOnce(Method) -> Method,
{
    ensure_installed(target, operation)?;
    let base = target.method(method)?;
    target.insert(method, wrap(base));
    debug!(method, kind = ?operation, "registered interceptor");
    Ok(())
}

/// Resolve an asynchronous base, wrap it and write the result back.
fn wrap_async_method<W>(
    target: &mut Target,
    operation: Operation,
    method: &str,
    wrap: W,
) -> AdviceResult<()>
where
    W: FnOnce(AsyncMethod) -> AsyncMethod,
{
    ensure_installed(target, operation)?;
    let base = target.async_method(method)?;
    target.insert(method, wrap(base));
    debug!(method, kind = ?operation, "registered interceptor");
    Ok(())
}
