//! Compound components: one owner, many caller-arranged fields.
//!
//! An owner holds a composite value and a mutation callback. It publishes
//! both as a [`CompoundScope`] to whatever children the caller hands it and
//! builds those children verbatim, in the caller's order. Each field looks the
//! scope up through its own [`BuildContext`], renders one [`Facet`] of the
//! value and, on input, hands the owner a fresh composite with only that facet
//! replaced.
//!
//! Replacements are applied to the composite most recently handed to the
//! owner, not to the one of the last pass, so several field events delivered
//! before the next pass all survive.
//!
//! Only the value and the callback travel through the scope. Labels, bounds
//! and other presentation details are ordinary arguments of each field.
//!
//! # Examples
//!
//! ```
//! use trellis_ui::{
//!     Children, CallbackWith, Runtime, from_fn,
//!     compound::{Composite, Facet, compound_owner, use_compound},
//! };
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Size {
//!     width: u32,
//!     height: u32,
//! }
//!
//! impl Composite for Size {
//!     const OWNER: &'static str = "size_fields";
//! }
//!
//! #[derive(Clone, Copy)]
//! struct Width;
//!
//! impl Facet<Size> for Width {
//!     type Value = u32;
//!     fn name(&self) -> &'static str {
//!         "width"
//!     }
//!     fn get(&self, composite: &Size) -> u32 {
//!         composite.width
//!     }
//!     fn replace(&self, composite: &Size, value: u32) -> Size {
//!         Size { width: value, ..composite.clone() }
//!     }
//! }
//!
//! let children = Children::new().child(from_fn("width_field", |cx| {
//!     let scope = use_compound::<Size>(cx, "width_field")?;
//!     assert_eq!(scope.get(Width), 3);
//!     Ok(())
//! }));
//! let mut runtime = Runtime::new(from_fn("app", move |cx| {
//!     compound_owner(cx, Size { width: 3, height: 4 }, CallbackWith::noop(), &children)
//! }));
//! assert!(runtime.render().is_ok());
//! ```

use std::fmt::Debug;

use tracing::trace;

use crate::{
    composer::{BuildContext, BuildResult},
    error::BuildError,
    prop::{CallbackWith, Children},
    runtime::State,
};

/// An immutable whole that fields edit one facet at a time.
pub trait Composite: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Name of the owner component, reported when a field has no scope.
    const OWNER: &'static str;
}

/// One named part of a composite.
pub trait Facet<V>: Copy + Send + Sync + 'static {
    /// Type of the part.
    type Value;

    /// Name of the part.
    fn name(&self) -> &'static str;

    /// Reads the part.
    fn get(&self, composite: &V) -> Self::Value;

    /// Returns a new composite equal to `composite` except for this part.
    fn replace(&self, composite: &V, value: Self::Value) -> V;
}

/// What an owner publishes to its fields for one pass.
pub struct CompoundScope<V> {
    value: V,
    latest: State<V>,
    on_change: CallbackWith<V>,
}

impl<V> Clone for CompoundScope<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            latest: self.latest.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<V> CompoundScope<V>
where
    V: Composite,
{
    /// Composite value of this pass.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The owner's mutation callback.
    pub fn on_change(&self) -> &CallbackWith<V> {
        &self.on_change
    }

    /// Reads one facet of the current value.
    pub fn get<F>(&self, facet: F) -> F::Value
    where
        F: Facet<V>,
    {
        facet.get(&self.value)
    }

    /// Hands a whole new composite to the owner.
    pub fn set(&self, value: V) {
        self.latest.with_mut_untracked(|latest| *latest = value.clone());
        self.on_change.call(value);
    }

    /// Replaces one facet of the composite last handed to the owner and hands
    /// the result to the owner.
    pub fn replace<F>(&self, facet: F, value: F::Value)
    where
        F: Facet<V>,
    {
        let next = self.latest.with_mut_untracked(|latest| {
            *latest = facet.replace(latest, value);
            latest.clone()
        });
        trace!(owner = V::OWNER, facet = facet.name(), ?next, "facet changed");
        self.on_change.call(next);
    }

    /// Callback that replaces `facet`, see [`CompoundScope::replace`].
    pub fn facet_setter<F>(&self, facet: F) -> CallbackWith<F::Value>
    where
        F: Facet<V>,
    {
        let scope = self.clone();
        CallbackWith::new(move |value| scope.replace(facet, value))
    }
}

impl<V> Debug for CompoundScope<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompoundScope")
            .field("value", &self.value)
            .finish()
    }
}

/// Builds `children` inside a scope publishing `value` and `on_change`.
///
/// The scope is established afresh on every pass and dropped when this call
/// returns. Children are built in order and are not inspected.
pub fn compound_owner<V>(
    cx: &mut BuildContext<'_>,
    value: V,
    on_change: CallbackWith<V>,
    children: &Children,
) -> BuildResult
where
    V: Composite,
{
    cx.component(V::OWNER, |cx| {
        let latest = cx.remember(|| value.clone());
        latest.with_mut_untracked(|latest| *latest = value.clone());
        let scope = CompoundScope {
            value,
            latest,
            on_change,
        };
        cx.provide_context(scope, |cx| cx.children(children))
    })
}

/// Looks up the nearest enclosing owner of `V`.
///
/// Fails with [`BuildError::MissingScope`] when `consumer` is built outside
/// of any owner.
pub fn use_compound<V>(
    cx: &BuildContext<'_>,
    consumer: &'static str,
) -> Result<CompoundScope<V>, BuildError>
where
    V: Composite,
{
    let scope = cx.require_context::<CompoundScope<V>>(consumer, V::OWNER)?;
    Ok(CompoundScope::clone(&scope))
}
