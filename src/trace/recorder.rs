//! Call Recorder Module
//!
//! Wrappers that count invocations and record input/output history for any
//! named operation, without touching the operation itself.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::store::KeyValueStore;

// == Key Helpers ==
/// Store key of the list holding rendered inputs for `name`.
pub fn inputs_key(name: &str) -> String {
    format!("{}:inputs", name)
}

/// Store key of the list holding rendered outputs for `name`.
pub fn outputs_key(name: &str) -> String {
    format!("{}:outputs", name)
}

/// Longest rendered input or output kept in a history list, in bytes.
pub const MAX_RENDERED_LEN: usize = 64 * 1024;

/// Renders a single positional argument as a one-element tuple, e.g. `('bar',)`.
pub fn render_args<T: fmt::Display>(input: &T) -> String {
    format!("({},)", input)
}

/// Cuts `rendered` to at most `MAX_RENDERED_LEN` bytes on a char boundary,
/// marking the cut with a trailing `...`.
pub fn clip_rendered(mut rendered: String) -> String {
    const MARKER: &str = "...";
    if rendered.len() <= MAX_RENDERED_LEN {
        return rendered;
    }

    let mut end = MAX_RENDERED_LEN - MARKER.len();
    while !rendered.is_char_boundary(end) {
        end -= 1;
    }
    rendered.truncate(end);
    rendered.push_str(MARKER);
    rendered
}

// == Traceable ==
/// An operation identified by a stable qualified name.
///
/// The counter for an operation lives under its name; history lists live
/// under `<name>:inputs` and `<name>:outputs`.
#[async_trait]
pub trait Traceable: Send + Sync {
    type Input: fmt::Display + Send + 'static;
    type Output: fmt::Display + Send + 'static;

    fn qualified_name(&self) -> &str;

    async fn invoke(&self, input: Self::Input) -> Result<Self::Output>;
}

// == With Counting ==
/// Increments the operation's counter before every invocation.
///
/// The increment happens even when the wrapped call then fails.
pub struct WithCounting<T> {
    inner: T,
    store: Arc<dyn KeyValueStore>,
}

impl<T: Traceable> WithCounting<T> {
    pub fn new(inner: T, store: Arc<dyn KeyValueStore>) -> Self {
        Self { inner, store }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[async_trait]
impl<T: Traceable> Traceable for WithCounting<T> {
    type Input = T::Input;
    type Output = T::Output;

    fn qualified_name(&self) -> &str {
        self.inner.qualified_name()
    }

    async fn invoke(&self, input: Self::Input) -> Result<Self::Output> {
        let name = self.qualified_name();
        let count = self.store.incr(name).await?;
        debug!("{} call #{}", name, count);

        self.inner.invoke(input).await
    }
}

// == With History ==
/// Appends the rendered input before, and the rendered output after, every
/// successful invocation. Failed calls leave an input without an output.
/// Renderings longer than `MAX_RENDERED_LEN` are clipped.
pub struct WithHistory<T> {
    inner: T,
    store: Arc<dyn KeyValueStore>,
}

impl<T: Traceable> WithHistory<T> {
    pub fn new(inner: T, store: Arc<dyn KeyValueStore>) -> Self {
        Self { inner, store }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[async_trait]
impl<T: Traceable> Traceable for WithHistory<T> {
    type Input = T::Input;
    type Output = T::Output;

    fn qualified_name(&self) -> &str {
        self.inner.qualified_name()
    }

    async fn invoke(&self, input: Self::Input) -> Result<Self::Output> {
        let name = self.qualified_name();
        let rendered_input = clip_rendered(render_args(&input));
        self.store
            .rpush(&inputs_key(name), rendered_input.into_bytes())
            .await?;

        let output = self.inner.invoke(input).await?;

        let rendered_output = clip_rendered(output.to_string());
        self.store
            .rpush(&outputs_key(name), rendered_output.into_bytes())
            .await?;
        debug!("{} recorded output {}", name, output);

        Ok(output)
    }
}

// == Extension Trait ==
/// Builder-style stacking: `op.counted(store.clone()).with_history(store)`.
pub trait TraceableExt: Traceable + Sized {
    fn counted(self, store: Arc<dyn KeyValueStore>) -> WithCounting<Self> {
        WithCounting::new(self, store)
    }

    fn with_history(self, store: Arc<dyn KeyValueStore>) -> WithHistory<Self> {
        WithHistory::new(self, store)
    }
}

impl<T: Traceable> TraceableExt for T {}

// == Function Operation ==
/// Adapts a named async function into a `Traceable` operation.
pub struct FnOperation<F, I, O> {
    name: String,
    func: F,
    _marker: PhantomData<fn(I) -> O>,
}

impl<F, I, O> FnOperation<F, I, O> {
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut, I, O> Traceable for FnOperation<F, I, O>
where
    F: Fn(I) -> Fut + Send + Sync,
    Fut: Future<Output = Result<O>> + Send,
    I: fmt::Display + Send + 'static,
    O: fmt::Display + Send + 'static,
{
    type Input = I;
    type Output = O;

    fn qualified_name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: I) -> Result<O> {
        (self.func)(input).await
    }
}
