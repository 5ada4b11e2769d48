// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The session object tying tree, geometry, drag and transitions together.

use core::time::Duration;

use kurbo::Point;
use lineage_path::{ControlPoints, PathData};
use lineage_tree::{ExpansionState, LayoutDamage, NodeFlags, NodeId, TidyLayout, Tree};

use crate::rendered::Rendered;
use crate::scene::Scene;
use crate::transition::TransitionKind;
use crate::{
    DragController, DragState, DropOutcome, Mode, NodeIndex, NodePlacement, StageConfig,
    StageError, Surface, Transition,
};

/// Result of advancing a [`Session`] by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Progress {
    /// Nothing is animating.
    Idle,
    /// A transition is running; eased progress so far.
    Running(f64),
    /// A transition drew its final frame this tick.
    Finished(TransitionKind),
}

/// An interactive lineage chart.
///
/// Owns the tree, the render-scaled control points and everything derived
/// from them. Callers feed it user actions and frame ticks and hand it a
/// [`Surface`] to draw on; it never draws by itself.
///
/// At most one mode switch runs at a time, and a mode switch never overlaps
/// a drag. A relayout may be superseded by another relayout, which then
/// starts from whatever was last drawn.
#[derive(Debug)]
pub struct Session {
    tree: Tree,
    points: ControlPoints,
    config: StageConfig,
    layout: TidyLayout,
    mode: Mode,
    index: NodeIndex,
    drag: DragController,
    transition: Option<Transition>,
    rendered: Rendered,
    highlighted: Vec<NodeId>,
}

impl Session {
    /// Start a session over `tree`, with `points` at canonical size.
    pub fn new(mut tree: Tree, points: &ControlPoints, config: StageConfig) -> Self {
        let scale = config.canvas_scale();
        tree.scale_boxes(&scale);
        let points = points.scaled(&scale);
        let layout = TidyLayout::new(config.layout_size());
        layout.apply(&mut tree);
        tree.commit_positions();

        let mut session = Self {
            tree,
            points,
            layout,
            mode: config.initial_mode,
            index: NodeIndex::new(),
            drag: DragController::new(config.snap_radius),
            transition: None,
            rendered: Rendered::default(),
            highlighted: Vec::new(),
            config,
        };
        session.rebuild_index();
        log::debug!(
            "session started in {} mode with {} nodes",
            session.mode,
            session.tree.len()
        );
        session
    }

    /// Load a tree and a control-point dictionary from JSON.
    pub fn load(
        tree_json: &str,
        points_json: &str,
        config: StageConfig,
    ) -> Result<Self, StageError> {
        let tree = Tree::from_json_str(tree_json)?;
        let points = ControlPoints::from_json_str(points_json)?;
        Ok(Self::new(tree, &points, config))
    }

    /// The tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Control points scaled to render size.
    pub fn control_points(&self) -> &ControlPoints {
        &self.points
    }

    /// The configuration this session was started with.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Mode currently drawn, or being entered if a switch is running.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The running transition.
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Where the drag stands.
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Drop-target index.
    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    /// Whether a mode switch or a drag is in progress.
    pub fn is_busy(&self) -> bool {
        self.drag.is_active() || self.switching()
    }

    /// Resting placement of `id` in the current mode.
    pub fn placement(&self, id: NodeId) -> Option<NodePlacement> {
        self.scene().placement(id, self.mode)
    }

    /// Resting shape of the edge into `child` in the current mode.
    pub fn edge_path(&self, child: NodeId) -> Result<PathData, StageError> {
        let parent = self.tree.parent(child).ok_or(StageError::NoEdge(child))?;
        Ok(self.scene().edge_path(parent, child, self.mode)?)
    }

    /// SVG path data of every visible edge in the current mode, keyed by child.
    ///
    /// Edges whose shape cannot be built are left out.
    pub fn svg_paths(&self) -> Vec<(NodeId, String)> {
        let scene = self.scene();
        self.tree
            .links()
            .into_iter()
            .filter_map(|(parent, child)| match scene.edge_path(parent, child, self.mode) {
                Ok(path) => Some((child, path.to_svg())),
                Err(e) => {
                    log::warn!("edge into {child} left out of export: {e}");
                    None
                }
            })
            .collect()
    }

    /// Draw the resting state immediately, ending any running transition.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.transition = None;
        let Some(root) = self.tree.root() else {
            return;
        };
        let scene = Scene {
            tree: &self.tree,
            points: &self.points,
            offset: self.config.modern_offset(),
        };
        let mut out = self.rendered.track(surface);
        for id in self.tree.visible_descendants(root) {
            if let Some(p) = scene.placement(id, self.mode) {
                out.place_node(id, p);
            }
        }
        for (parent, child) in self.tree.links() {
            match scene.edge_path(parent, child, self.mode) {
                Ok(path) => out.draw_edge(child, &path),
                Err(e) => {
                    log::warn!("edge into {child} not drawn: {e}");
                    out.hide_edge(child);
                }
            }
        }
        let visible = |id: NodeId| {
            self.tree
                .flags(id)
                .is_some_and(|f| f.contains(NodeFlags::VISIBLE))
        };
        let stale_nodes: Vec<NodeId> = self
            .rendered
            .nodes()
            .into_iter()
            .map(|(id, _)| id)
            .filter(|&id| !visible(id))
            .collect();
        let stale_edges: Vec<NodeId> = self
            .rendered
            .edges()
            .into_iter()
            .map(|(id, _)| id)
            .filter(|&id| !visible(id))
            .collect();
        let mut out = self.rendered.track(surface);
        for id in stale_nodes {
            out.hide_node(id);
        }
        for id in stale_edges {
            out.hide_edge(id);
        }
    }

    /// Start switching to the other mode and return it.
    ///
    /// Fails with [`StageError::Busy`] while a drag or any transition is running.
    pub fn begin_mode_switch(&mut self) -> Result<Mode, StageError> {
        if self.drag.is_active() {
            return Err(StageError::Busy("drag"));
        }
        if self.transition.is_some() {
            return Err(StageError::Busy("transition"));
        }
        let from = self.mode;
        let to = from.toggled();
        let transition =
            Transition::mode_switch(&self.scene(), &self.rendered, from, to, &self.config);
        self.transition = Some(transition);
        self.mode = to;
        self.rebuild_index();
        log::info!("switching from {from} to {to} mode");
        Ok(to)
    }

    /// Advance the running transition by `dt` and draw the frame.
    pub fn tick<S: Surface + ?Sized>(&mut self, dt: Duration, surface: &mut S) -> Progress {
        let Some(transition) = self.transition.as_mut() else {
            return Progress::Idle;
        };
        transition.tick(dt);
        transition.render(&mut self.rendered.track(surface));
        if !transition.is_complete() {
            return Progress::Running(transition.progress());
        }
        let kind = transition.kind();
        self.transition = None;
        log::debug!("{kind:?} complete");
        Progress::Finished(kind)
    }

    /// Draw the final frame of the running transition now.
    pub fn finish<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<TransitionKind> {
        let mut transition = self.transition.take()?;
        transition.finish();
        transition.render(&mut self.rendered.track(surface));
        Some(transition.kind())
    }

    /// Expand or collapse `node` and animate to the new layout.
    pub fn toggle(&mut self, node: NodeId) -> Result<ExpansionState, StageError> {
        self.ensure_restructurable()?;
        let state = self.tree.toggle(node)?;
        self.relayout(node);
        Ok(state)
    }

    /// Expand `node` and everything below it.
    pub fn expand_all(&mut self, node: NodeId) -> Result<LayoutDamage, StageError> {
        self.ensure_restructurable()?;
        self.tree.expand_all(node)?;
        Ok(self.relayout(node))
    }

    /// Collapse everything below `node`, then `node` itself.
    pub fn collapse_all(&mut self, node: NodeId) -> Result<LayoutDamage, StageError> {
        self.ensure_restructurable()?;
        self.tree.collapse_all(node)?;
        Ok(self.relayout(node))
    }

    /// Grab `node` for dragging. Returns whether the drag started.
    ///
    /// The root is never draggable, and nothing is while a mode switch runs.
    /// A running relayout is finished first.
    pub fn drag_start<S: Surface + ?Sized>(&mut self, node: NodeId, surface: &mut S) -> bool {
        if self.switching() {
            log::debug!("ignoring drag of {node}: mode switch in progress");
            return false;
        }
        if self.tree.parent(node).is_none() {
            log::debug!("ignoring drag of {node}: root or unknown node");
            return false;
        }
        self.finish(surface);
        let mut out = self.rendered.track(surface);
        self.drag.start(&mut self.tree, &mut self.index, node, &mut out)
    }

    /// Move the dragged `node` to `pointer`; returns the current drop target.
    pub fn drag_move<S: Surface + ?Sized>(
        &mut self,
        node: NodeId,
        pointer: Point,
        surface: &mut S,
    ) -> Option<NodeId> {
        let scene = Scene {
            tree: &self.tree,
            points: &self.points,
            offset: self.config.modern_offset(),
        };
        let mut out = self.rendered.track(surface);
        self.drag.move_to(&scene, self.mode, &self.index, node, pointer, &mut out)
    }

    /// Drop `node`, reparenting it onto the current target if there is one.
    ///
    /// Whatever the outcome, the chart animates to the resulting layout.
    pub fn drag_end<S: Surface + ?Sized>(&mut self, node: NodeId, surface: &mut S) -> DropOutcome {
        let outcome = {
            let mut out = self.rendered.track(surface);
            self.drag.end(&mut self.tree, node, &mut out)
        };
        self.settle_drop(outcome);
        outcome
    }

    /// Abandon the current drag; the node animates back.
    pub fn drag_cancel<S: Surface + ?Sized>(&mut self, surface: &mut S) -> DropOutcome {
        let outcome = {
            let mut out = self.rendered.track(surface);
            self.drag.cancel(&mut self.tree, &mut out)
        };
        self.settle_drop(outcome);
        outcome
    }

    /// Emphasize `node` and its ancestors; returns them, `node` first.
    pub fn highlight_path<S: Surface + ?Sized>(
        &mut self,
        node: NodeId,
        surface: &mut S,
    ) -> Vec<NodeId> {
        self.tree.clear_flags(NodeFlags::HIGHLIGHTED);
        self.highlighted = self.tree.ancestors(node).collect();
        for &id in &self.highlighted {
            self.tree.set_flags(id, NodeFlags::HIGHLIGHTED, true);
        }
        surface.set_highlight(&self.highlighted);
        self.highlighted.clone()
    }

    /// Emphasize only the edge into `child`, as a hover does.
    ///
    /// Returns `None` and clears emphasis when `child` has no incoming edge.
    pub fn highlight_edge<S: Surface + ?Sized>(
        &mut self,
        child: NodeId,
        surface: &mut S,
    ) -> Option<NodeId> {
        self.tree.clear_flags(NodeFlags::HIGHLIGHTED);
        self.highlighted.clear();
        if self.tree.parent(child).is_some() {
            self.tree.set_flags(child, NodeFlags::HIGHLIGHTED, true);
            self.highlighted.push(child);
        }
        surface.set_highlight(&self.highlighted);
        self.highlighted.first().copied()
    }

    /// Remove any emphasis.
    pub fn clear_highlight<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.tree.clear_flags(NodeFlags::HIGHLIGHTED);
        self.highlighted.clear();
        surface.set_highlight(&[]);
    }

    /// Currently emphasized nodes.
    pub fn highlighted(&self) -> &[NodeId] {
        &self.highlighted
    }

    fn settle_drop(&mut self, outcome: DropOutcome) {
        match outcome {
            DropOutcome::Reparented { to, .. } => {
                self.relayout(to);
            }
            DropOutcome::Cancelled { node } | DropOutcome::Rejected { node, .. } => {
                self.relayout(node);
            }
            DropOutcome::Ignored => {}
        }
    }

    fn ensure_restructurable(&self) -> Result<(), StageError> {
        if self.drag.is_active() {
            return Err(StageError::Busy("drag"));
        }
        if self.switching() {
            return Err(StageError::Busy("mode switch"));
        }
        Ok(())
    }

    fn switching(&self) -> bool {
        self.transition
            .as_ref()
            .is_some_and(|t| matches!(t.kind(), TransitionKind::ModeSwitch { .. }))
    }

    fn relayout(&mut self, source: NodeId) -> LayoutDamage {
        let damage = self.layout.apply(&mut self.tree);
        let transition =
            Transition::relayout(&self.scene(), &self.rendered, self.mode, source, &self.config);
        self.transition = Some(transition);
        self.tree.commit_positions();
        self.rebuild_index();
        log::debug!(
            "relayout from {source}: {} entered, {} exited",
            damage.entered.len(),
            damage.exited.len()
        );
        damage
    }

    fn rebuild_index(&mut self) {
        let scene = Scene {
            tree: &self.tree,
            points: &self.points,
            offset: self.config.modern_offset(),
        };
        let mode = self.mode;
        let nodes = self.tree.root().map_or_else(Vec::new, |r| {
            self.tree
                .visible_descendants(r)
                .into_iter()
                .filter(|&id| {
                    !self
                        .tree
                        .flags(id)
                        .is_some_and(|f| f.contains(NodeFlags::DETACHED))
                })
                .filter_map(|id| Some((id, scene.placement(id, mode)?.center)))
                .collect()
        });
        self.index.rebuild(nodes);
    }

    fn scene(&self) -> Scene<'_> {
        Scene {
            tree: &self.tree,
            points: &self.points,
            offset: self.config.modern_offset(),
        }
    }
}
