//! Remembered state and the render-pass driver.
//!
//! The [`Runtime`] owns everything that outlives a single pass: the slot
//! table behind [`State`] handles, focus, queued tasks and the last committed
//! [`Frame`]. A pass rebuilds the whole tree from the root component, recycles
//! the state of components that did not show up again, commits the frame and
//! then runs the effects scheduled during the build.

use std::{
    any::{Any, TypeId},
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::{
        Arc, OnceLock,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, error, trace, warn};

use crate::{
    NodeId,
    component_tree::InputEvent,
    composer::{Component, Composer},
    entry_point::RuntimeConfig,
    error::{BuildError, DispatchError},
    focus_state::FocusState,
    frame::Frame,
    prop::CallbackWith,
    task::TaskQueue,
};

pub(crate) fn hash_components<H: Hash + ?Sized>(parts: &[&H]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for part in parts {
        part.hash(&mut hasher);
    }
    hasher.finish()
}

/// Dirty flag shared by every state of one runtime.
#[derive(Debug, Default)]
pub(crate) struct Invalidator {
    dirty: AtomicBool,
    generation: AtomicU64,
}

impl Invalidator {
    pub(crate) fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.dirty.store(true, Ordering::Release);
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    pub(crate) fn clear(&self) {
        self.dirty.store(false, Ordering::Release);
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

struct StateCell<T> {
    value: RwLock<T>,
    invalidator: Arc<Invalidator>,
    setter: OnceLock<CallbackWith<T>>,
}

/// Handle to state remembered across passes.
///
/// Created by [`BuildContext::remember`](crate::BuildContext::remember). The
/// handle is cheap to clone and `Send + Sync`, so it can be captured by
/// callbacks. Every write marks the runtime dirty; the new value becomes
/// visible to components on the next pass.
pub struct State<T> {
    cell: Arc<StateCell<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> State<T>
where
    T: Send + Sync + 'static,
{
    fn new(value: T, invalidator: Arc<Invalidator>) -> Self {
        Self {
            cell: Arc::new(StateCell {
                value: RwLock::new(value),
                invalidator,
                setter: OnceLock::new(),
            }),
        }
    }

    /// Execute a closure with a shared reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.cell.value.read();
        f(&guard)
    }

    /// Execute a closure with a mutable reference to the stored value.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = {
            let mut guard = self.cell.value.write();
            f(&mut guard)
        };
        self.cell.invalidator.invalidate();
        result
    }

    /// Mutates without scheduling a pass. Used for bookkeeping slots.
    pub(crate) fn with_mut_untracked<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.cell.value.write();
        f(&mut guard)
    }

    /// Get a cloned value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(Clone::clone)
    }

    /// Replace the stored value.
    pub fn set(&self, value: T) {
        self.with_mut(|slot| *slot = value);
    }

    /// Replace the stored value unless it is equal to the current one.
    ///
    /// Returns whether a write happened.
    pub fn set_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        {
            let mut guard = self.cell.value.write();
            if *guard == value {
                trace!(ty = std::any::type_name::<T>(), "state write skipped, value unchanged");
                return false;
            }
            *guard = value;
        }
        self.cell.invalidator.invalidate();
        true
    }

    /// Returns the setter callback for this state.
    ///
    /// The same callback instance is returned for the lifetime of the slot,
    /// so it is stable across passes. Writing an equal value is a no-op.
    pub fn setter(&self) -> CallbackWith<T>
    where
        T: PartialEq,
    {
        self.cell
            .setter
            .get_or_init(|| {
                let weak = Arc::downgrade(&self.cell);
                CallbackWith::new(move |value: T| {
                    if let Some(cell) = weak.upgrade() {
                        State { cell }.set_if_changed(value);
                    }
                })
            })
            .clone()
    }

    /// Whether both handles point to the same slot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T> std::fmt::Debug for State<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("State").field(&*self.cell.value.read()).finish()
    }
}

#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub(crate) struct SlotKey {
    pub(crate) logic_id: u64,
    pub(crate) slot_hash: u64,
    pub(crate) type_id: TypeId,
}

struct SlotEntry {
    value: Arc<dyn Any + Send + Sync>,
    last_alive_epoch: u64,
}

/// Storage behind every [`State`] of one runtime.
#[derive(Default)]
pub(crate) struct SlotTable {
    entries: HashMap<SlotKey, SlotEntry>,
    epoch: u64,
}

impl SlotTable {
    pub(crate) fn begin_frame(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub(crate) fn reset(&mut self) {
        self.entries.clear();
        self.epoch = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn remember<T, F>(
        &mut self,
        key: SlotKey,
        invalidator: &Arc<Invalidator>,
        init: F,
    ) -> State<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let epoch = self.epoch;
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_alive_epoch = epoch;
            if let Ok(cell) = Arc::clone(&entry.value).downcast::<StateCell<T>>() {
                return State { cell };
            }
            // Keys carry the `TypeId`, so this only happens on a hash collision.
            warn!(?key, "slot type mismatch, reinitializing");
        }

        let state = State::new(init(), Arc::clone(invalidator));
        self.entries.insert(
            key,
            SlotEntry {
                value: Arc::clone(&state.cell) as Arc<dyn Any + Send + Sync>,
                last_alive_epoch: epoch,
            },
        );
        state
    }

    /// Drops slots that were not touched during the current pass.
    pub(crate) fn recycle(&mut self) -> usize {
        let epoch = self.epoch;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.last_alive_epoch == epoch);
        before - self.entries.len()
    }
}

/// Drives render passes and input for one root component.
pub struct Runtime {
    root: Arc<dyn Component>,
    config: RuntimeConfig,
    slots: SlotTable,
    invalidator: Arc<Invalidator>,
    focus: FocusState,
    tasks: TaskQueue,
    frame: Option<Frame>,
    frame_index: u64,
}

impl Runtime {
    /// Creates a runtime with the default configuration.
    pub fn new(root: impl Component + 'static) -> Self {
        Self::with_config(root, RuntimeConfig::default())
    }

    /// Creates a runtime with an explicit configuration.
    pub fn with_config(root: impl Component + 'static, config: RuntimeConfig) -> Self {
        Self {
            root: Arc::new(root),
            config,
            slots: SlotTable::default(),
            invalidator: Arc::new(Invalidator::default()),
            focus: FocusState::default(),
            tasks: TaskQueue::default(),
            frame: None,
            frame_index: 0,
        }
    }

    /// The configuration this runtime was created with.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Runs one pass and commits the resulting frame.
    pub fn render(&mut self) -> Result<&Frame, BuildError> {
        let frame = self.pass()?;
        Ok(self.frame.insert(frame))
    }

    /// Renders until no state is dirty, bounded by
    /// [`RuntimeConfig::max_settle_passes`].
    pub fn settle(&mut self) -> Result<&Frame, BuildError> {
        let mut frame = self.pass()?;
        let mut passes = 1;
        while self.invalidator.is_dirty() && passes < self.config.max_settle_passes {
            frame = self.pass()?;
            passes += 1;
        }
        if self.invalidator.is_dirty() {
            warn!(
                passes,
                "state is still dirty after the settle limit; effects may be writing state every pass"
            );
        }
        Ok(self.frame.insert(frame))
    }

    fn pass(&mut self) -> Result<Frame, BuildError> {
        let frame_index = self.frame_index + 1;
        let span = tracing::debug_span!("pass", runtime = %self.config.name, frame = frame_index);
        let _entered = span.enter();

        self.invalidator.clear();
        self.slots.begin_frame();

        let mut composer = Composer::new(
            std::mem::take(&mut self.slots),
            Arc::clone(&self.invalidator),
            self.tasks.spawner(),
            self.focus.clone(),
        );
        let root = Arc::clone(&self.root);
        let result = composer.compose(root.as_ref());
        let (tree, slots, effects) = composer.finish();
        self.slots = slots;

        if let Err(err) = result {
            error!(%err, "build pass failed");
            return Err(err);
        }

        let recycled = self.slots.recycle();
        self.frame_index = frame_index;
        let frame = Frame::new(tree, frame_index, self.focus.clone());
        debug!(
            nodes = frame.len(),
            slots = self.slots.len(),
            recycled,
            effects = effects.len(),
            "frame committed"
        );

        for effect in effects {
            effect();
        }
        Ok(frame)
    }

    /// The last committed frame.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Whether some state changed since the last pass started.
    pub fn needs_render(&self) -> bool {
        self.invalidator.is_dirty()
    }

    /// Monotonic counter of state writes, useful to observe no-op updates.
    pub fn state_generation(&self) -> u64 {
        self.invalidator.generation()
    }

    /// Delivers an input event to a node of the last committed frame.
    ///
    /// A click on a submit button is also delivered as
    /// [`InputEvent::Submit`] to the nearest enclosing form.
    ///
    /// Events may be delivered several times between passes. Handlers are the
    /// ones of the committed frame; compound fields still edit the composite
    /// last handed to their owner, so earlier events are not overwritten.
    pub fn dispatch(&mut self, target: NodeId, event: InputEvent) -> Result<(), DispatchError> {
        let frame = self.frame.as_ref().ok_or(DispatchError::NoFrame)?;
        let deliveries = frame.route(target, event)?;
        for (node, handler, event) in deliveries {
            debug!(?node, ?event, "dispatch");
            handler.call(event);
        }
        Ok(())
    }

    /// Polls spawned tasks until none of them can make progress.
    ///
    /// Returns how many tasks were started.
    pub fn run_pending(&mut self) -> usize {
        self.tasks.run_until_stalled()
    }

    /// Tasks queued or still in flight.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.pending()
    }

    /// Drops all remembered state, as if every component unmounted.
    pub fn reset(&mut self) {
        self.slots.reset();
        self.frame = None;
        self.invalidator.invalidate();
    }
}
