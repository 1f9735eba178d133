//! Committed output of a pass and the queries used to inspect it.

use std::fmt::Write as _;

use crate::{
    NodeId,
    component_tree::{ComponentNode, ComponentTree, Element, ElementKind, InputEvent, InputHandlerFn},
    error::DispatchError,
    focus_state::FocusState,
};

/// The tree committed by the last successful pass.
pub struct Frame {
    tree: ComponentTree,
    index: u64,
    focus: FocusState,
}

impl Frame {
    pub(crate) fn new(tree: ComponentTree, index: u64, focus: FocusState) -> Self {
        Self { tree, index, focus }
    }

    /// Sequence number of the pass that produced this frame, starting at 1.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The component tree.
    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the frame has no nodes.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Element rendered by a node.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.tree.get(id)?.element.as_ref()
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &Element)> + '_ {
        self.tree
            .iter()
            .filter_map(|(id, node)| node.element.as_ref().map(|el| (id, el)))
    }

    /// Elements inside the subtree rooted at `root`, in document order.
    pub fn elements_within(&self, root: NodeId) -> impl Iterator<Item = (NodeId, &Element)> + '_ {
        root.descendants(self.tree.arena()).filter_map(move |id| {
            self.tree
                .get(id)
                .and_then(|node| node.element.as_ref())
                .map(|el| (id, el))
        })
    }

    /// First element matching the predicate.
    pub fn find(&self, predicate: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.elements()
            .find(|(_, el)| predicate(*el))
            .map(|(id, _)| id)
    }

    /// First element whose label or accessible name equals `label`.
    pub fn find_by_label(&self, label: &str) -> Option<NodeId> {
        self.find(|el| {
            el.attrs.label.as_deref() == Some(label) || el.attrs.aria_label.as_deref() == Some(label)
        })
    }

    /// Like [`Frame::find_by_label`], restricted to a subtree.
    pub fn find_by_label_within(&self, root: NodeId, label: &str) -> Option<NodeId> {
        self.elements_within(root)
            .find(|(_, el)| {
                el.attrs.label.as_deref() == Some(label)
                    || el.attrs.aria_label.as_deref() == Some(label)
            })
            .map(|(id, _)| id)
    }

    /// Element with the given id attribute.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.find(|el| el.attrs.id.as_deref() == Some(id))
    }

    /// First element of a kind.
    pub fn find_kind(&self, kind: ElementKind) -> Option<NodeId> {
        self.find(|el| el.kind == kind)
    }

    /// Nodes created by components with the given name, in document order.
    pub fn components_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.tree
            .iter()
            .filter(move |(_, node)| node.fn_name == name)
            .map(|(id, _)| id)
    }

    /// Node of the component tree.
    pub fn node(&self, id: NodeId) -> Option<&ComponentNode> {
        self.tree.get(id)
    }

    /// Text of every static text element, in document order.
    pub fn text_content(&self) -> Vec<&str> {
        self.elements()
            .filter(|(_, el)| el.kind == ElementKind::Text)
            .filter_map(|(_, el)| el.text())
            .collect()
    }

    /// Whether some static text element shows exactly `text`.
    pub fn contains_text(&self, text: &str) -> bool {
        self.text_content().contains(&text)
    }

    /// Node holding focus, if its focus handle is attached to an element.
    pub fn focused(&self) -> Option<NodeId> {
        let focused = self.focus.current()?;
        self.find(|el| el.focus == Some(focused))
    }

    /// Human-readable dump of the elements, indented by depth.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for (id, el) in self.elements() {
            let depth = self
                .tree
                .ancestors(id)
                .filter(|ancestor| self.element(*ancestor).is_some())
                .count();
            let _ = writeln!(out, "{:indent$}{el}", "", indent = depth * 2);
        }
        out
    }

    pub(crate) fn route(
        &self,
        target: NodeId,
        event: InputEvent,
    ) -> Result<Vec<(NodeId, InputHandlerFn, InputEvent)>, DispatchError> {
        let element = self
            .element(target)
            .ok_or(DispatchError::UnknownNode(target))?;

        let mut deliveries = Vec::new();
        if let Some(handler) = &element.handler {
            deliveries.push((target, handler.clone(), event.clone()));
        }

        let submits = element.kind == ElementKind::Button
            && element.attrs.submit
            && event == InputEvent::Click;
        if submits {
            let form = self.tree.ancestors(target).find_map(|ancestor| {
                let el = self.element(ancestor)?;
                (el.kind == ElementKind::Form)
                    .then(|| el.handler.clone().map(|handler| (ancestor, handler)))
                    .flatten()
            });
            if let Some((form_id, handler)) = form {
                deliveries.push((form_id, handler, InputEvent::Submit));
            }
        }

        if deliveries.is_empty() {
            return Err(DispatchError::NoHandler(target));
        }
        Ok(deliveries)
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("index", &self.index)
            .field("nodes", &self.len())
            .finish()
    }
}
