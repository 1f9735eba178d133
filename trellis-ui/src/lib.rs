//! trellis is a small, headless, declarative UI core.
//!
//! # Components
//!
//! A component is any value implementing [`Component`]. Its `build` method
//! runs on every pass and describes the subtree through the [`BuildContext`]
//! it receives. Closures can be turned into components with [`from_fn`].
//!
//! ```
//! use trellis_ui::{BuildContext, BuildResult, Component, Runtime, from_fn};
//!
//! struct Greeting;
//!
//! impl Component for Greeting {
//!     fn build(&self, cx: &mut BuildContext<'_>) -> BuildResult {
//!         cx.component("inner", |_cx| Ok(()))
//!     }
//! }
//!
//! let mut runtime = Runtime::new(from_fn("app", |cx| cx.child(&Greeting)));
//! let frame = runtime.render().unwrap();
//! assert_eq!(frame.components_named("Greeting").count(), 1);
//! ```
//!
//! # Remembered State
//!
//! [`BuildContext::remember`] keeps a value across passes for as long as the
//! component keeps appearing at the same place. Writes through a [`State`]
//! handle mark the runtime dirty and are visible on the next pass.
//!
//! ```
//! use trellis_ui::{Runtime, from_fn};
//!
//! let mut runtime = Runtime::new(from_fn("counter", |cx| {
//!     let count = cx.remember(|| 0u32);
//!     cx.effect_once(move || count.set(1));
//!     Ok(())
//! }));
//! runtime.render().unwrap();
//! assert!(runtime.needs_render());
//! ```
//!
//! # Context
//!
//! Values provided with [`BuildContext::provide_context`] are visible to
//! everything built inside the closure and nothing else. The context is
//! passed explicitly through the build context; there is no global "current
//! scope". The [`compound`] module builds owner/field composition on top of
//! it.
#![deny(missing_docs, clippy::unwrap_used)]

mod component_tree;
pub mod composer;
pub mod compound;
pub mod context;
mod entry_point;
mod error;
pub mod focus_state;
mod frame;
pub mod prop;
mod runtime;
pub mod task;
#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use indextree::{Arena, NodeId};

pub use crate::{
    component_tree::{
        Attributes, Choice, ComponentNode, ComponentTree, ControlValue, Element, ElementKind,
        InputEvent, InputHandlerFn,
    },
    composer::{BuildContext, BuildResult, Component, FnComponent, from_fn},
    context::Scope,
    entry_point::{EntryPoint, RuntimeConfig},
    error::{BuildError, DispatchError},
    focus_state::{Focus, FocusId},
    frame::Frame,
    prop::{Callback, CallbackWith, Children},
    runtime::{Runtime, State},
    task::TaskSpawner,
};
