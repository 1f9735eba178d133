//! Callback and child-list handles used in component arguments.
//!
//! ## Usage
//!
//! Store callbacks in `*Args` structs and compare them by identity so args can
//! derive `PartialEq` without comparing closures.

use std::{fmt, sync::Arc};

use smallvec::SmallVec;

use crate::composer::Component;

/// Shared callable compared by identity (`Arc::ptr_eq`).
pub struct Slot<F: ?Sized> {
    inner: Arc<F>,
}

impl<F: ?Sized> Slot<F> {
    /// Wraps an already shared callable.
    pub fn from_shared(handler: Arc<F>) -> Self {
        Self { inner: handler }
    }

    /// Returns the shared callable.
    pub fn shared(&self) -> Arc<F> {
        Arc::clone(&self.inner)
    }

    /// Whether both slots point at the same callable.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<F: ?Sized> Clone for Slot<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: ?Sized> PartialEq for Slot<F> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<F: ?Sized> Eq for Slot<F> {}

/// Identity-compared handle for `Fn()`, used for clicks and submits.
#[derive(Clone)]
pub struct Callback {
    slot: Slot<dyn Fn() + Send + Sync>,
}

impl Callback {
    /// Creates a callback from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(handler)),
        }
    }

    /// A callback that does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Invokes the callback.
    pub fn call(&self) {
        let handler = self.slot.shared();
        handler();
    }
}

impl<F> From<F> for Callback
where
    F: Fn() + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl Default for Callback {
    fn default() -> Self {
        Self::noop()
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Identity-compared handle for `Fn(T) -> R`.
///
/// This is the shape of every value-change handler, including the mutation
/// callback a compound owner publishes to its fields.
pub struct CallbackWith<T, R = ()> {
    slot: Slot<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Creates a callback from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(handler)),
        }
    }

    /// Invokes the callback with an argument.
    pub fn call(&self, value: T) -> R {
        let handler = self.slot.shared();
        handler(value)
    }

    /// Whether both handles refer to the same closure instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.slot.ptr_eq(&other.slot)
    }
}

impl<T> CallbackWith<T, ()> {
    /// A callback that drops its argument.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }
}

impl<T> Default for CallbackWith<T, ()> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallbackWith<{}>(..)", std::any::type_name::<T>())
    }
}

/// Caller-ordered list of child components.
///
/// Containers build the entries verbatim and in order; they never inspect
/// which components are present.
#[derive(Clone, Default)]
pub struct Children {
    items: SmallVec<[Arc<dyn Component>; 4]>,
}

impl Children {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child.
    pub fn child(mut self, component: impl Component + 'static) -> Self {
        self.items.push(Arc::new(component));
        self
    }

    /// Appends an already shared child.
    pub fn child_shared(mut self, component: Arc<dyn Component>) -> Self {
        self.items.push(component);
        self
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the children in caller order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Component>> {
        self.items.iter()
    }
}

impl PartialEq for Children {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(other.items.iter())
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.items.iter().map(|child| child.name()))
            .finish()
    }
}

impl<C> FromIterator<C> for Children
where
    C: Component + 'static,
{
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|c| Arc::new(c) as Arc<dyn Component>)
                .collect(),
        }
    }
}
