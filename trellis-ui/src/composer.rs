//! Component trait and the build context handed to every component.
//!
//! A component never reaches for ambient state: everything it may touch
//! during a build (remembered state, provided context, effects, tasks,
//! focus) is reached through the [`BuildContext`] it is given. Providing a
//! context value creates a child `BuildContext` for the nested closure, which
//! is how the nearest provider shadows outer ones and how sibling subtrees
//! stay isolated.

use std::{any::TypeId, hash::Hash, sync::Arc};

use tracing::trace;

use crate::{
    component_tree::{ComponentNode, ComponentTree, Element},
    context::Scope,
    error::BuildError,
    focus_state::{Focus, FocusState},
    prop::Children,
    runtime::{Invalidator, SlotKey, SlotTable, State, hash_components},
    task::TaskSpawner,
};

/// Result of building a component.
pub type BuildResult = Result<(), BuildError>;

pub(crate) type PendingEffect = Box<dyn FnOnce() + Send>;

/// Something that can be built into the component tree.
pub trait Component: Send + Sync {
    /// Name recorded on the component's node.
    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Builds the component's subtree.
    fn build(&self, cx: &mut BuildContext<'_>) -> BuildResult;
}

fn short_type_name(full: &'static str) -> &'static str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

/// Component backed by a closure. See [`from_fn`].
pub struct FnComponent<F> {
    name: &'static str,
    build: F,
}

impl<F> Component for FnComponent<F>
where
    F: Fn(&mut BuildContext<'_>) -> BuildResult + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn build(&self, cx: &mut BuildContext<'_>) -> BuildResult {
        (self.build)(cx)
    }
}

/// Wraps a closure as a named component.
///
/// # Examples
///
/// ```
/// use trellis_ui::{Runtime, from_fn};
///
/// let mut runtime = Runtime::new(from_fn("app", |cx| {
///     let visits = cx.remember(|| 0u32);
///     assert_eq!(visits.get(), 0);
///     Ok(())
/// }));
/// assert!(runtime.render().is_ok());
/// ```
pub fn from_fn<F>(name: &'static str, build: F) -> FnComponent<F>
where
    F: Fn(&mut BuildContext<'_>) -> BuildResult + Send + Sync,
{
    FnComponent { name, build }
}

#[derive(Default, Clone, Copy)]
struct EffectSlot {
    last_deps: Option<u64>,
}

pub(crate) struct Composer {
    tree: ComponentTree,
    slots: SlotTable,
    effects: Vec<PendingEffect>,
    invalidator: Arc<Invalidator>,
    spawner: TaskSpawner,
    focus: FocusState,
}

impl Composer {
    pub(crate) fn new(
        slots: SlotTable,
        invalidator: Arc<Invalidator>,
        spawner: TaskSpawner,
        focus: FocusState,
    ) -> Self {
        Self {
            tree: ComponentTree::new(),
            slots,
            effects: Vec::new(),
            invalidator,
            spawner,
            focus,
        }
    }

    pub(crate) fn compose(&mut self, root: &dyn Component) -> BuildResult {
        let mut cx = BuildContext {
            composer: self,
            scope: Scope::new(),
            logic_id: 0,
            call_counter: 0,
            child_counter: 0,
        };
        cx.child(root)
    }

    pub(crate) fn finish(self) -> (ComponentTree, SlotTable, Vec<PendingEffect>) {
        (self.tree, self.slots, self.effects)
    }
}

/// Per-component build handle.
pub struct BuildContext<'a> {
    composer: &'a mut Composer,
    scope: Scope,
    logic_id: u64,
    call_counter: u64,
    child_counter: u64,
}

impl BuildContext<'_> {
    fn nested(&mut self, logic_id: u64, scope: Scope) -> BuildContext<'_> {
        BuildContext {
            composer: &mut *self.composer,
            scope,
            logic_id,
            call_counter: 0,
            child_counter: 0,
        }
    }

    fn enter<F>(
        &mut self,
        name: &'static str,
        logic_id: u64,
        element: Option<Element>,
        f: F,
    ) -> BuildResult
    where
        F: FnOnce(&mut BuildContext<'_>) -> BuildResult,
    {
        self.composer.tree.add_node(ComponentNode {
            fn_name: name.to_string(),
            logic_id,
            element,
        });
        let scope = self.scope.clone();
        let result = {
            let mut child = self.nested(logic_id, scope);
            f(&mut child)
        };
        self.composer.tree.pop_node();
        result
    }

    fn next_child_id(&mut self, name: &'static str) -> u64 {
        let index = self.child_counter;
        self.child_counter += 1;
        hash_components(&[&self.logic_id, &hash_components(&[name]), &index])
    }

    /// Builds a nested component boundary named `name`.
    ///
    /// State remembered inside is tied to this boundary's position among its
    /// siblings.
    pub fn component<F>(&mut self, name: &'static str, f: F) -> BuildResult
    where
        F: FnOnce(&mut BuildContext<'_>) -> BuildResult,
    {
        let logic_id = self.next_child_id(name);
        self.enter(name, logic_id, None, f)
    }

    /// Like [`BuildContext::component`] but identified by `key` instead of
    /// position, so state follows the key when siblings are reordered.
    pub fn keyed_component<K, F>(&mut self, key: K, name: &'static str, f: F) -> BuildResult
    where
        K: Hash,
        F: FnOnce(&mut BuildContext<'_>) -> BuildResult,
    {
        let key_hash = hash_components(&[&key]);
        let logic_id = hash_components(&[&self.logic_id, &hash_components(&[name]), &key_hash]);
        self.enter(name, logic_id, None, f)
    }

    /// Builds a child component.
    pub fn child(&mut self, component: &dyn Component) -> BuildResult {
        self.component(component.name(), |cx| component.build(cx))
    }

    /// Builds every child in caller order.
    pub fn children(&mut self, children: &Children) -> BuildResult {
        for child in children.iter() {
            self.child(child.as_ref())?;
        }
        Ok(())
    }

    /// Adds an element node and builds its content beneath it.
    pub fn element<F>(&mut self, name: &'static str, element: Element, content: F) -> BuildResult
    where
        F: FnOnce(&mut BuildContext<'_>) -> BuildResult,
    {
        let logic_id = self.next_child_id(name);
        self.enter(name, logic_id, Some(element), content)
    }

    /// Adds an element node without content.
    pub fn leaf(&mut self, name: &'static str, element: Element) -> BuildResult {
        self.element(name, element, |_| Ok(()))
    }

    /// Groups a block under a stable key, transparent to the tree.
    ///
    /// State remembered inside the block and the identity of components built
    /// inside it follow `key` rather than call order.
    pub fn key<K, F, R>(&mut self, key: K, block: F) -> R
    where
        K: Hash,
        F: FnOnce(&mut BuildContext<'_>) -> R,
    {
        let group_id = hash_components(&[&self.logic_id, &hash_components(&[&key])]);
        let scope = self.scope.clone();
        let mut child = self.nested(group_id, scope);
        block(&mut child)
    }

    /// Makes `value` visible to everything built inside `f`.
    ///
    /// The layer is dropped when `f` returns. Remembered state and child
    /// identities inside `f` behave as if `f` were inlined.
    pub fn provide_context<T, F, R>(&mut self, value: T, f: F) -> R
    where
        T: Send + Sync + 'static,
        F: FnOnce(&mut BuildContext<'_>) -> R,
    {
        self.provide_shared_context(Arc::new(value), f)
    }

    /// Like [`BuildContext::provide_context`] for an already shared value.
    pub fn provide_shared_context<T, F, R>(&mut self, value: Arc<T>, f: F) -> R
    where
        T: Send + Sync + 'static,
        F: FnOnce(&mut BuildContext<'_>) -> R,
    {
        let scope = self.scope.provide_shared(value);
        trace!(ty = std::any::type_name::<T>(), depth = scope.depth(), "provide context");
        let logic_id = self.logic_id;
        let (result, calls, children) = {
            let mut child = BuildContext {
                composer: &mut *self.composer,
                scope,
                logic_id,
                call_counter: self.call_counter,
                child_counter: self.child_counter,
            };
            let result = f(&mut child);
            (result, child.call_counter, child.child_counter)
        };
        self.call_counter = calls;
        self.child_counter = children;
        result
    }

    /// Reads the nearest provided value of type `T`.
    pub fn use_context<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.scope.get::<T>()
    }

    /// Reads the nearest provided value of type `T` or fails with
    /// [`BuildError::MissingScope`].
    pub fn require_context<T>(
        &self,
        consumer: &'static str,
        provider: &'static str,
    ) -> Result<Arc<T>, BuildError>
    where
        T: Send + Sync + 'static,
    {
        self.scope.require::<T>(consumer, provider)
    }

    /// The scope visible at this point of the build.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Remembers a value across passes, identified by call order.
    pub fn remember<T, F>(&mut self, init: F) -> State<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        self.remember_with_key((), init)
    }

    /// Remembers a value across passes, identified by `key` and call order.
    pub fn remember_with_key<K, T, F>(&mut self, key: K, init: F) -> State<T>
    where
        K: Hash,
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let call = self.call_counter;
        self.call_counter += 1;
        let slot_key = SlotKey {
            logic_id: self.logic_id,
            slot_hash: hash_components(&[&hash_components(&[&key]), &call]),
            type_id: TypeId::of::<T>(),
        };
        self.composer
            .slots
            .remember(slot_key, &self.composer.invalidator, init)
    }

    /// Schedules `effect` after this pass whenever the hash of `deps` differs
    /// from the previous pass, and on the first pass.
    pub fn effect_with<K, F>(&mut self, deps: K, effect: F)
    where
        K: Hash,
        F: FnOnce() + Send + 'static,
    {
        let deps_hash = hash_components(&[&deps]);
        let slot = self.remember(EffectSlot::default);
        if slot.with(|slot| slot.last_deps) == Some(deps_hash) {
            return;
        }
        // The hash is only recorded once the effect runs, so a failed pass
        // that drops its effects schedules them again next time.
        self.composer.effects.push(Box::new(move || {
            slot.with_mut_untracked(|slot| slot.last_deps = Some(deps_hash));
            effect();
        }));
    }

    /// Schedules `effect` after the first pass this component appears in.
    pub fn effect_once<F>(&mut self, effect: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.effect_with((), effect);
    }

    /// Schedules `effect` after every pass.
    pub fn effect<F>(&mut self, effect: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.composer.effects.push(Box::new(effect));
    }

    /// Remembered focus handle for an element of this component.
    pub fn focus_handle(&mut self) -> Focus {
        let focus = self.composer.focus.clone();
        self.remember(move || Focus::new(focus)).get()
    }

    /// Spawner for asynchronous work started from handlers.
    pub fn spawner(&self) -> TaskSpawner {
        self.composer.spawner.clone()
    }
}
