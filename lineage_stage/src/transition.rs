// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed animations between two drawn states of the chart.
//!
//! A [`Transition`] is built once from the state currently on the surfaces and
//! the state the chart should end in. Node placements are interpolated
//! linearly; edge shapes go through a [`PathMorph`]. Nodes and edges share one
//! [`Tween`], so they start and finish together, and the final frame always
//! draws exact target geometry.

use core::time::Duration;

use kurbo::Point;
use lineage_path::{PathData, PathMorph, elbow_path, reconcile};
use lineage_tree::{NodeFlags, NodeId};

use crate::rendered::Rendered;
use crate::scene::Scene;
use crate::{Mode, NodePlacement, StageConfig, Surface, Tween};

/// What a [`Transition`] animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Switching between ancient and modern drawing.
    ModeSwitch {
        /// Mode being left.
        from: Mode,
        /// Mode being entered.
        to: Mode,
    },
    /// Moving to a new layout after expand, collapse or reparent.
    Relayout {
        /// Node whose change caused the layout.
        source: NodeId,
    },
}

#[derive(Clone, Debug)]
struct NodeMotion {
    id: NodeId,
    from: NodePlacement,
    to: NodePlacement,
    exit: bool,
}

/// Edge animation. No morph draws `exact` throughout; no `exact` hides the
/// edge once the transition completes.
#[derive(Clone, Debug)]
struct EdgeMotion {
    child: NodeId,
    morph: Option<PathMorph>,
    exact: Option<PathData>,
}

/// An in-flight animation of nodes and edges.
#[derive(Clone, Debug)]
pub struct Transition {
    kind: TransitionKind,
    tween: Tween,
    nodes: Vec<NodeMotion>,
    edges: Vec<EdgeMotion>,
}

impl Transition {
    /// What this transition animates.
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.tween.value()
    }

    /// Whether the final frame has been reached.
    pub fn is_complete(&self) -> bool {
        self.tween.is_complete()
    }

    /// Number of animated nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of animated edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn tick(&mut self, dt: Duration) {
        self.tween.tick(dt);
    }

    pub(crate) fn finish(&mut self) {
        self.tween.finish();
    }

    /// Push the current frame.
    pub(crate) fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let done = self.is_complete();
        let t = self.progress();
        for n in &self.nodes {
            match (done, n.exit) {
                (true, true) => surface.hide_node(n.id),
                (true, false) => surface.place_node(n.id, n.to),
                (false, _) => surface.place_node(n.id, n.from.lerp(&n.to, t)),
            }
        }
        for e in &self.edges {
            match (&e.morph, &e.exact) {
                (Some(m), _) if !done => surface.draw_edge(e.child, &m.at(t)),
                (_, Some(exact)) => surface.draw_edge(e.child, exact),
                (_, None) => surface.hide_edge(e.child),
            }
        }
    }

    /// Animate every visible node and edge from `from` mode to `to` mode.
    ///
    /// Edges are reconciled before morphing: the elbow side gains synthetic
    /// points so both shapes have the same command count. An edge whose target
    /// shape cannot be built is hidden; one whose starting shape cannot be
    /// built appears at its target without morphing.
    pub(crate) fn mode_switch(
        scene: &Scene<'_>,
        rendered: &Rendered,
        from: Mode,
        to: Mode,
        config: &StageConfig,
    ) -> Self {
        let tree = scene.tree;
        let visible = tree
            .root()
            .map(|r| tree.visible_descendants(r))
            .unwrap_or_default();

        let nodes = visible
            .iter()
            .filter_map(|&id| {
                let target = scene.placement(id, to)?;
                let start = rendered
                    .node(id)
                    .or_else(|| scene.placement(id, from))
                    .unwrap_or(target);
                Some(NodeMotion {
                    id,
                    from: start,
                    to: target,
                    exit: false,
                })
            })
            .collect();

        let mut edges = Vec::new();
        for (parent, child) in tree.links() {
            let target = match scene.edge_path(parent, child, to) {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("edge into {child} not drawn in {to} mode: {e}");
                    edges.push(EdgeMotion {
                        child,
                        morph: None,
                        exact: None,
                    });
                    continue;
                }
            };
            let start = match rendered.edge(child) {
                Some(p) => Ok(p.clone()),
                None => scene.edge_path(parent, child, from),
            };
            let start = match start {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("edge into {child} has no {from} shape to morph from: {e}");
                    edges.push(EdgeMotion {
                        child,
                        morph: None,
                        exact: Some(target),
                    });
                    continue;
                }
            };

            let count = scene.control_point_count(child);
            let equalized = match to {
                Mode::Modern => reconcile(&target, &start, count).map(|e| (start, e)),
                Mode::Ancient => reconcile(&start, &target, count).map(|e| (e, target.clone())),
            };
            let morph = match equalized {
                Ok((a, b)) => Some(PathMorph::new(&a, &b, config.sample_precision)),
                Err(e) => {
                    log::warn!("edge into {child} snaps without morphing: {e}");
                    None
                }
            };
            edges.push(EdgeMotion {
                child,
                morph,
                exact: Some(target),
            });
        }

        log::debug!(
            "mode switch {from} -> {to}: {} nodes, {} edges",
            visible.len(),
            edges.len()
        );
        Self {
            kind: TransitionKind::ModeSwitch { from, to },
            tween: Tween::new(config.duration, config.easing),
            nodes,
            edges,
        }
    }

    /// Animate from what is drawn to the latest layout, in `mode`.
    ///
    /// Anything not drawn yet grows out of `source`'s previous placement;
    /// anything drawn but no longer visible shrinks into `source`'s new
    /// placement and is hidden at the end.
    pub(crate) fn relayout(
        scene: &Scene<'_>,
        rendered: &Rendered,
        mode: Mode,
        source: NodeId,
        config: &StageConfig,
    ) -> Self {
        let tree = scene.tree;
        let origin = scene
            .previous_placement(source, mode)
            .or_else(|| rendered.node(source))
            .map_or(Point::ZERO, |p| p.center);
        let sink = scene
            .placement(source, mode)
            .map_or(origin, |p| p.center);
        let is_visible =
            |id: NodeId| tree.flags(id).is_some_and(|f| f.contains(NodeFlags::VISIBLE));

        let mut nodes = Vec::new();
        for id in tree
            .root()
            .map(|r| tree.visible_descendants(r))
            .unwrap_or_default()
        {
            let Some(target) = scene.placement(id, mode) else {
                continue;
            };
            let start = rendered.node(id).unwrap_or(NodePlacement {
                center: origin,
                size: target.size,
            });
            nodes.push(NodeMotion {
                id,
                from: start,
                to: target,
                exit: false,
            });
        }
        for (id, start) in rendered.nodes() {
            if is_visible(id) {
                continue;
            }
            nodes.push(NodeMotion {
                id,
                from: start,
                to: NodePlacement {
                    center: sink,
                    size: start.size,
                },
                exit: true,
            });
        }

        let precision = config.sample_precision;
        let mut edges = Vec::new();
        for (parent, child) in tree.links() {
            let target = match scene.edge_path(parent, child, mode) {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("edge into {child} not drawn in {mode} mode: {e}");
                    edges.push(EdgeMotion {
                        child,
                        morph: None,
                        exact: None,
                    });
                    continue;
                }
            };
            let start = rendered
                .edge(child)
                .cloned()
                .unwrap_or_else(|| elbow_path(origin, origin));
            edges.push(EdgeMotion {
                child,
                morph: Some(PathMorph::new(&start, &target, precision)),
                exact: Some(target),
            });
        }
        for (child, start) in rendered.edges() {
            if is_visible(child) {
                continue;
            }
            edges.push(EdgeMotion {
                child,
                morph: Some(PathMorph::new(start, &elbow_path(sink, sink), precision)),
                exact: None,
            });
        }

        log::debug!(
            "relayout from {source}: {} nodes, {} edges",
            nodes.len(),
            edges.len()
        );
        Self {
            kind: TransitionKind::Relayout { source },
            tween: Tween::new(config.duration, config.easing),
            nodes,
            edges,
        }
    }
}
