mod node;

use indextree::{Arena, NodeId};

pub use node::{
    Attributes, Choice, ComponentNode, ControlValue, Element, ElementKind, InputEvent,
    InputHandlerFn,
};

/// The tree built by one pass.
///
/// Nodes are appended under the node currently on top of the build stack, so
/// building follows an `add_node` / `pop_node` discipline.
#[derive(Default)]
pub struct ComponentTree {
    tree: Arena<ComponentNode>,
    root: Option<NodeId>,
    node_queue: Vec<NodeId>,
}

impl ComponentTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node under the current node and makes it current.
    pub fn add_node(&mut self, node_component: ComponentNode) -> NodeId {
        let new_node_id = self.tree.new_node(node_component);
        if let Some(current_node_id) = self.node_queue.last() {
            current_node_id.append(new_node_id, &mut self.tree);
        } else if self.root.is_none() {
            self.root = Some(new_node_id);
        }
        self.node_queue.push(new_node_id);
        new_node_id
    }

    /// Makes the parent of the current node current again.
    pub fn pop_node(&mut self) {
        self.node_queue.pop();
    }

    /// The node currently being built.
    pub fn current_node(&self) -> Option<NodeId> {
        self.node_queue.last().copied()
    }

    /// Root node, if anything was built.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Borrows a node.
    pub fn get(&self, id: NodeId) -> Option<&ComponentNode> {
        self.tree.get(id).map(|node| node.get())
    }

    /// Underlying arena, for traversal.
    pub fn arena(&self) -> &Arena<ComponentNode> {
        &self.tree
    }

    /// Nodes in depth-first pre-order, i.e. document order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ComponentNode)> + '_ {
        self.root
            .into_iter()
            .flat_map(move |root| root.descendants(&self.tree))
            .filter_map(move |id| self.get(id).map(|node| (id, node)))
    }

    /// Direct children of a node.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.tree)
    }

    /// Ancestors of a node, nearest first, excluding the node itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.ancestors(&self.tree).skip(1)
    }

    /// Depth of a node below the root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.tree.count()
    }

    /// Whether nothing was built.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str) -> ComponentNode {
        ComponentNode {
            fn_name: name.to_string(),
            logic_id: 0,
            element: None,
        }
    }

    #[test]
    fn builds_in_document_order() {
        let mut tree = ComponentTree::new();
        let root = tree.add_node(node("root"));
        let first = tree.add_node(node("first"));
        tree.pop_node();
        let second = tree.add_node(node("second"));
        let nested = tree.add_node(node("nested"));
        tree.pop_node();
        tree.pop_node();
        tree.pop_node();

        let names: Vec<&str> = tree.iter().map(|(_, n)| n.fn_name.as_str()).collect();
        assert_eq!(names, ["root", "first", "second", "nested"]);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.children(root).collect::<Vec<_>>(), [first, second]);
        assert_eq!(tree.ancestors(nested).collect::<Vec<_>>(), [second, root]);
        assert_eq!(tree.depth(nested), 2);
        assert_eq!(tree.current_node(), None);
    }
}
