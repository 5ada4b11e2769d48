// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, collapse state, reparenting, queries.

use core::fmt;

use kurbo::{Point, Rect};
use lineage_path::CanvasScale;

use crate::TreeError;
use crate::types::{Children, ExpansionState, NodeData, NodeFlags, NodeId};

/// A rooted tree of [`NodeData`] with per-node layout and ancient-box positions.
///
/// Nodes are never removed, so a [`NodeId`] stays valid for the lifetime of
/// the tree. Structure changes only through [`Tree::insert`] and
/// [`Tree::reparent`]; visibility changes through expand and collapse.
///
/// ## Example
///
/// ```rust
/// use lineage_tree::{ExpansionState, NodeData, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(None, NodeData::named("root")).unwrap();
/// let a = tree.insert(Some(root), NodeData::named("a")).unwrap();
/// let b = tree.insert(Some(root), NodeData::named("b")).unwrap();
///
/// // Collapsing hides children without forgetting them.
/// assert_eq!(tree.toggle(root).unwrap(), ExpansionState::Collapsed);
/// assert_eq!(tree.visible_descendants(root), [root]);
///
/// // Moves are structural and work on hidden nodes too.
/// tree.reparent(b, a).unwrap();
/// tree.expand(root).unwrap();
/// assert_eq!(tree.visible_descendants(root), [root, a, b]);
/// ```
#[derive(Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let collapsed = self
            .nodes
            .iter()
            .filter(|n| n.children.state() == ExpansionState::Collapsed)
            .count();
        f.debug_struct("Tree")
            .field("nodes", &self.nodes.len())
            .field("collapsed", &collapsed)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Children,
    data: NodeData,
    position: Point,
    previous: Point,
    ancient_box: Rect,
    flags: NodeFlags,
}

impl Node {
    fn new(parent: Option<NodeId>, data: NodeData) -> Self {
        Self {
            parent,
            children: Children::default(),
            ancient_box: data.position,
            data,
            position: Point::ZERO,
            previous: Point::ZERO,
            flags: NodeFlags::empty(),
        }
    }
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node as the last child of `parent`, or as the root if `None`.
    ///
    /// A child is added to its parent's current list, so inserting under a
    /// collapsed node leaves the new child hidden.
    pub fn insert(&mut self, parent: Option<NodeId>, data: NodeData) -> Result<NodeId, TreeError> {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        match parent {
            None => {
                if let Some(root) = self.root {
                    return Err(TreeError::MalformedTreeInput(format!(
                        "second root `{}` (root is {root})",
                        data.name
                    )));
                }
                self.root = Some(id);
            }
            Some(p) => self.node_mut(p)?.children.ids_mut().push(id),
        }
        self.nodes.push(Node::new(parent, data));
        Ok(id)
    }

    /// The root node.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Total number of nodes, visible or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` names a node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Every node id, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let idx = i as u32;
            NodeId::new(idx)
        })
    }

    /// Authored data of a node.
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.idx()).map(|n| &n.data)
    }

    /// Name of a node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.data(id).map(|d| d.name.as_str())
    }

    /// Parent of a node; `None` for the root or an unknown id.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.idx())?.parent
    }

    /// Children of a node with their expansion state.
    pub fn children(&self, id: NodeId) -> Option<&Children> {
        self.nodes.get(id.idx()).map(|n| &n.children)
    }

    /// Expansion state of a node.
    pub fn state(&self, id: NodeId) -> Option<ExpansionState> {
        self.children(id).map(Children::state)
    }

    /// Flip a node between expanded and collapsed. Leaves stay expanded.
    ///
    /// Only this node's list changes; descendants keep their own state.
    pub fn toggle(&mut self, id: NodeId) -> Result<ExpansionState, TreeError> {
        let children = &mut self.node_mut(id)?.children;
        let next = match children.state() {
            ExpansionState::Expanded => ExpansionState::Collapsed,
            ExpansionState::Collapsed => ExpansionState::Expanded,
        };
        children.set_state(next);
        Ok(children.state())
    }

    /// Show a node's children.
    pub fn expand(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.node_mut(id)?.children.set_state(ExpansionState::Expanded);
        Ok(())
    }

    /// Hide a node's children.
    pub fn collapse(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.node_mut(id)?.children.set_state(ExpansionState::Collapsed);
        Ok(())
    }

    /// Expand `id` and every node below it.
    pub fn expand_all(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.set_subtree_state(id, ExpansionState::Expanded)
    }

    /// Collapse `id` and every node below it.
    pub fn collapse_all(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.set_subtree_state(id, ExpansionState::Collapsed)
    }

    fn set_subtree_state(&mut self, id: NodeId, state: ExpansionState) -> Result<(), TreeError> {
        self.node(id)?;
        for n in self.descendants(id) {
            self.nodes[n.idx()].children.set_state(state);
        }
        Ok(())
    }

    /// Move `id` to be the last child of `target`.
    ///
    /// The node joins `target`'s current list: it is hidden if `target` is
    /// collapsed. Moving the root, or moving a node under itself or one of its
    /// descendants, is rejected.
    pub fn reparent(&mut self, id: NodeId, target: NodeId) -> Result<(), TreeError> {
        self.node(target)?;
        let invalid = TreeError::InvalidReparentTarget { node: id, target };
        let Some(old_parent) = self.node(id)?.parent else {
            return Err(invalid);
        };
        if target == id || self.is_ancestor(id, target) {
            return Err(invalid);
        }

        let siblings = &mut self.nodes[old_parent.idx()].children;
        let Some(pos) = siblings.ids().iter().position(|c| *c == id) else {
            return Err(TreeError::Inconsistent {
                node: id,
                parent: old_parent,
            });
        };
        siblings.ids_mut().remove(pos);
        if siblings.is_empty() {
            *siblings = Children::default();
        }
        self.nodes[target.idx()].children.ids_mut().push(id);
        self.nodes[id.idx()].parent = Some(target);
        log::debug!("moved {id} from {old_parent} to {target}");
        Ok(())
    }

    /// Whether `ancestor` lies strictly above `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).skip(1).any(|a| a == ancestor)
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(self.contains(id).then_some(id), move |n| {
            self.nodes[n.idx()].parent
        })
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count().saturating_sub(1)
    }

    /// `id` and everything below it in pre-order, hidden nodes included.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.preorder(id, Children::ids)
    }

    /// `id` and everything below it in pre-order, skipping collapsed subtrees.
    pub fn visible_descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.preorder(id, Children::visible)
    }

    fn preorder(&self, id: NodeId, next: fn(&Children) -> &[NodeId]) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(next(&self.nodes[n.idx()].children).iter().rev());
        }
        out
    }

    /// Visible `(parent, child)` edges in pre-order of the child.
    pub fn links(&self) -> Vec<(NodeId, NodeId)> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        self.visible_descendants(root)
            .into_iter()
            .filter_map(|c| Some((self.nodes[c.idx()].parent?, c)))
            .collect()
    }

    /// Position from the most recent layout pass.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(id.idx()).map(|n| n.position)
    }

    /// Position before the most recent layout pass.
    pub fn previous_position(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(id.idx()).map(|n| n.previous)
    }

    pub(crate) fn set_position(&mut self, id: NodeId, position: Point) {
        if let Some(n) = self.nodes.get_mut(id.idx()) {
            n.position = position;
        }
    }

    /// Snapshot every visible node's position as its previous position.
    ///
    /// Call once per layout pass, after everything that animates from the old
    /// positions has read them.
    pub fn commit_positions(&mut self) {
        for n in &mut self.nodes {
            if n.flags.contains(NodeFlags::VISIBLE) {
                n.previous = n.position;
            }
        }
    }

    /// Ancient-mode box at render size.
    pub fn ancient_box(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id.idx()).map(|n| n.ancient_box)
    }

    /// Center of the ancient-mode box at render size.
    pub fn ancient_center(&self, id: NodeId) -> Option<Point> {
        self.ancient_box(id).map(|r| r.center())
    }

    /// Recompute every ancient box from its canonical box.
    pub fn scale_boxes(&mut self, scale: &CanvasScale) {
        for n in &mut self.nodes {
            n.ancient_box = scale.scale_box(n.data.position);
        }
    }

    /// Flags of a node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.nodes.get(id.idx()).map(|n| n.flags)
    }

    /// Set or clear `flags` on a node.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags, on: bool) {
        if let Some(n) = self.nodes.get_mut(id.idx()) {
            n.flags.set(flags, on);
        }
    }

    /// Clear `flags` on every node.
    pub fn clear_flags(&mut self, flags: NodeFlags) {
        for n in &mut self.nodes {
            n.flags.remove(flags);
        }
    }

    fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(id.idx()).ok_or(TreeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(id.idx()).ok_or(TreeError::UnknownNode(id))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;

    /// root -> (a -> (a1, a2), b)
    fn sample() -> (Tree, [NodeId; 5]) {
        let mut t = Tree::new();
        let root = t.insert(None, NodeData::named("root")).unwrap();
        let a = t.insert(Some(root), NodeData::named("a")).unwrap();
        let a1 = t.insert(Some(a), NodeData::named("a1")).unwrap();
        let a2 = t.insert(Some(a), NodeData::named("a2")).unwrap();
        let b = t.insert(Some(root), NodeData::named("b")).unwrap();
        (t, [root, a, a1, a2, b])
    }

    #[test]
    fn second_root_is_rejected() {
        let (mut t, _) = sample();
        assert!(matches!(
            t.insert(None, NodeData::named("again")),
            Err(TreeError::MalformedTreeInput(_))
        ));
    }

    #[test]
    fn toggle_is_not_recursive() {
        let (mut t, [root, a, a1, a2, b]) = sample();
        t.collapse(a).unwrap();
        t.collapse(root).unwrap();
        assert_eq!(t.visible_descendants(root), [root]);
        t.expand(root).unwrap();
        // `a` kept its own collapsed state.
        assert_eq!(t.visible_descendants(root), [root, a, b]);
        assert_eq!(t.toggle(a).unwrap(), ExpansionState::Expanded);
        assert_eq!(t.visible_descendants(root), [root, a, a1, a2, b]);
    }

    #[test]
    fn leaves_stay_expanded() {
        let (mut t, [_, _, a1, ..]) = sample();
        assert_eq!(t.toggle(a1).unwrap(), ExpansionState::Expanded);
        t.collapse(a1).unwrap();
        assert_eq!(t.state(a1), Some(ExpansionState::Expanded));
    }

    #[test]
    fn bulk_expand_and_collapse() {
        let (mut t, [root, a, ..]) = sample();
        t.collapse_all(root).unwrap();
        assert_eq!(t.state(a), Some(ExpansionState::Collapsed));
        t.expand_all(root).unwrap();
        assert_eq!(t.visible_descendants(root).len(), 5);
    }

    #[test]
    fn reparent_moves_exactly_once() {
        let (mut t, [root, a, a1, _, b]) = sample();
        t.reparent(a1, b).unwrap();
        assert!(!t.children(a).unwrap().ids().contains(&a1));
        assert_eq!(t.children(b).unwrap().ids(), [a1]);
        assert_eq!(t.parent(a1), Some(b));
        assert_eq!(t.descendants(root).len(), 5);
    }

    #[test]
    fn reparent_into_collapsed_keeps_it_hidden() {
        let (mut t, [root, a, _, _, b]) = sample();
        t.collapse(a).unwrap();
        t.reparent(b, a).unwrap();
        assert_eq!(t.state(a), Some(ExpansionState::Collapsed));
        assert_eq!(t.children(a).unwrap().ids().last(), Some(&b));
        assert_eq!(t.visible_descendants(root), [root, a]);
    }

    #[test]
    fn emptied_parent_becomes_an_expanded_leaf() {
        let (mut t, [_, a, a1, a2, b]) = sample();
        t.collapse(a).unwrap();
        t.reparent(a1, b).unwrap();
        t.reparent(a2, b).unwrap();
        assert_eq!(t.children(a), Some(&Children::Expanded(Vec::new())));
    }

    #[test]
    fn reparent_rejects_cycles_and_root() {
        let (mut t, [root, a, a1, _, b]) = sample();
        for (node, target) in [(a, a1), (a, a), (root, b)] {
            assert!(matches!(
                t.reparent(node, target),
                Err(TreeError::InvalidReparentTarget { .. })
            ));
        }
        assert!(matches!(
            t.reparent(a, NodeId::new(99)),
            Err(TreeError::UnknownNode(_))
        ));
        assert_eq!(t.descendants(root).len(), 5);
        assert_eq!(t.parent(a), Some(root));
    }

    #[test]
    fn ancestors_and_links() {
        let (t, [root, a, a1, a2, b]) = sample();
        assert_eq!(t.ancestors(a2).collect::<Vec<_>>(), [a2, a, root]);
        assert_eq!(t.depth(a2), 2);
        assert!(t.is_ancestor(root, a1));
        assert!(!t.is_ancestor(a1, a1));
        assert_eq!(t.links(), [(root, a), (a, a1), (a, a2), (root, b)]);
    }

    #[test]
    fn boxes_scale_from_canonical_data() {
        let mut t = Tree::new();
        let mut data = NodeData::named("r");
        data.position = Rect::new(10.0, 10.0, 30.0, 50.0);
        let r = t.insert(None, data).unwrap();
        t.scale_boxes(&CanvasScale::new(Size::new(100.0, 100.0), Size::new(50.0, 50.0)));
        assert_eq!(t.ancient_box(r), Some(Rect::new(5.0, 5.0, 15.0, 25.0)));
        assert_eq!(t.ancient_center(r), Some(Point::new(10.0, 15.0)));
        // Rescaling starts from the canonical box, not the scaled one.
        t.scale_boxes(&CanvasScale::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0)));
        assert_eq!(t.ancient_box(r), Some(Rect::new(10.0, 10.0, 30.0, 50.0)));
    }

    #[test]
    fn flags_toggle_per_node() {
        let (mut t, [root, a, ..]) = sample();
        t.set_flags(a, NodeFlags::HIGHLIGHTED, true);
        t.set_flags(root, NodeFlags::HIGHLIGHTED, true);
        t.clear_flags(NodeFlags::HIGHLIGHTED);
        assert_eq!(t.flags(a), Some(NodeFlags::empty()));
    }
}
