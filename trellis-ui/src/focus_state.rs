//! # Focus State Management
//!
//! Focus is modelled as shared state rather than as a reference to a node:
//! a component obtains a [`Focus`] handle, attaches its id to the element
//! that should receive focus, and requests focus from an effect or handler.
//! The runtime owns one focus slot, so at most one handle is focused at a
//! time. Dropping the last clone of a focused handle clears focus.

use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

/// Identifier attached to an element that can take focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusId(Uuid);

impl FocusId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// The focus slot of one runtime.
#[derive(Clone, Default, Debug)]
pub(crate) struct FocusState {
    focused: Arc<RwLock<Option<FocusId>>>,
}

impl FocusState {
    pub(crate) fn current(&self) -> Option<FocusId> {
        *self.focused.read()
    }
}

#[derive(Debug)]
struct FocusInner {
    id: FocusId,
    state: FocusState,
}

impl Drop for FocusInner {
    fn drop(&mut self) {
        let mut focused = self.state.focused.write();
        if *focused == Some(self.id) {
            *focused = None;
        }
    }
}

/// A focus handle that represents a focusable element.
///
/// Obtain one with [`BuildContext::focus_handle`](crate::BuildContext::focus_handle).
#[derive(Clone, Debug)]
pub struct Focus {
    inner: Arc<FocusInner>,
}

impl Focus {
    pub(crate) fn new(state: FocusState) -> Self {
        Self {
            inner: Arc::new(FocusInner {
                id: FocusId::new(),
                state,
            }),
        }
    }

    /// The id to attach to the focusable element.
    pub fn id(&self) -> FocusId {
        self.inner.id
    }

    /// Whether this handle currently holds focus.
    pub fn is_focused(&self) -> bool {
        self.inner.state.current() == Some(self.inner.id)
    }

    /// Moves focus to this handle.
    pub fn request_focus(&self) {
        *self.inner.state.focused.write() = Some(self.inner.id);
    }

    /// Clears focus if this handle holds it.
    pub fn unfocus(&self) {
        let mut focused = self.inner.state.focused.write();
        if *focused == Some(self.inner.id) {
            *focused = None;
        }
    }
}

impl PartialEq for Focus {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Focus {}
