//! Context values shared with descendants during a build pass.
//!
//! A [`Scope`] is an immutable, layered map from type to value. Providing a
//! value never mutates the parent scope; it produces a child layer that
//! shares structure with its parent. The layer lives exactly as long as the
//! [`BuildContext`](crate::BuildContext) it was handed to, so two sibling
//! providers can never observe each other's values.
//!
//! # Examples
//!
//! ```
//! use trellis_ui::context::Scope;
//!
//! #[derive(Debug, PartialEq)]
//! struct Theme(&'static str);
//!
//! let root = Scope::new();
//! let dark = root.provide(Theme("dark"));
//! let nested = dark.provide(Theme("high-contrast"));
//!
//! assert!(root.get::<Theme>().is_none());
//! assert_eq!(*dark.get::<Theme>().unwrap(), Theme("dark"));
//! assert_eq!(*nested.get::<Theme>().unwrap(), Theme("high-contrast"));
//! ```

use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

use im::HashMap;

use crate::error::BuildError;

type ContextMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// One layer of provided context values.
#[derive(Clone, Default)]
pub struct Scope {
    values: ContextMap,
    depth: usize,
}

impl Scope {
    /// The empty root scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a child scope in which `value` shadows any outer value of the
    /// same type.
    pub fn provide<T>(&self, value: T) -> Scope
    where
        T: Send + Sync + 'static,
    {
        self.provide_shared(Arc::new(value))
    }

    /// Like [`Scope::provide`] for a value that is already shared.
    pub fn provide_shared<T>(&self, value: Arc<T>) -> Scope
    where
        T: Send + Sync + 'static,
    {
        let mut values = self.values.clone();
        values.insert(TypeId::of::<T>(), value);
        Scope {
            values,
            depth: self.depth + 1,
        }
    }

    /// Reads the value provided by the nearest enclosing layer.
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let value = self.values.get(&TypeId::of::<T>())?.clone();
        // The map is keyed by `TypeId`, so the downcast only fails if that
        // invariant is broken.
        value.downcast::<T>().ok()
    }

    /// Reads the nearest value or fails with [`BuildError::MissingScope`].
    pub fn require<T>(
        &self,
        consumer: &'static str,
        provider: &'static str,
    ) -> Result<Arc<T>, BuildError>
    where
        T: Send + Sync + 'static,
    {
        self.get::<T>()
            .ok_or(BuildError::MissingScope { consumer, provider })
    }

    /// Whether a value of type `T` is visible from this scope.
    pub fn contains<T>(&self) -> bool
    where
        T: Send + Sync + 'static,
    {
        self.values.contains_key(&TypeId::of::<T>())
    }

    /// How many layers were provided above the root.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("depth", &self.depth)
            .field("values", &self.values.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(u32);

    #[test]
    fn nearest_layer_wins() {
        let outer = Scope::new().provide(Marker(1));
        let inner = outer.provide(Marker(2));
        assert_eq!(inner.get::<Marker>().map(|m| m.0), Some(2));
        assert_eq!(outer.get::<Marker>().map(|m| m.0), Some(1));
        assert_eq!(inner.depth(), 2);
    }

    #[test]
    fn sibling_layers_are_isolated() {
        let root = Scope::new();
        let left = root.provide(Marker(10));
        let right = root.provide(Marker(20));
        assert_eq!(left.get::<Marker>().map(|m| m.0), Some(10));
        assert_eq!(right.get::<Marker>().map(|m| m.0), Some(20));
        assert!(!root.contains::<Marker>());
    }

    #[test]
    fn require_reports_missing_scope() {
        match Scope::new().require::<Marker>("leaf", "owner") {
            Err(err) => assert_eq!(
                err,
                BuildError::MissingScope {
                    consumer: "leaf",
                    provider: "owner"
                }
            ),
            Ok(_) => panic!("lookup outside any provider must fail"),
        }
    }
}
