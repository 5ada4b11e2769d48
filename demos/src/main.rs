// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walk a small lineage chart through a mode switch, a collapse and a drag.
//!
//! Every surface call is logged; run with `RUST_LOG=debug` to see the
//! session's own decisions as well, or `RUST_LOG=trace` for per-frame output.
//!
//! Run:
//! - `cargo run -p lineage_demos`

use core::time::Duration;

use kurbo::Point;
use lineage_path::PathData;
use lineage_stage::{Fanout, NodePlacement, Progress, Session, StageConfig, Surface};
use lineage_tree::NodeId;

const TREE: &str = include_str!("../data/tree.json");
const POINTS: &str = include_str!("../data/control_points.json");

/// 60 frames per second.
const FRAME: Duration = Duration::from_micros(16_667);

/// Logs every frame it is handed.
#[derive(Debug, Default)]
struct LogSurface {
    frames: usize,
}

impl Surface for LogSurface {
    fn place_node(&mut self, id: NodeId, placement: NodePlacement) {
        log::trace!("node {id} at {:?}", placement.center);
    }

    fn hide_node(&mut self, id: NodeId) {
        log::trace!("node {id} hidden");
    }

    fn draw_edge(&mut self, child: NodeId, path: &PathData) {
        self.frames += 1;
        log::trace!("edge {child}: {path}");
    }

    fn hide_edge(&mut self, child: NodeId) {
        log::trace!("edge {child} hidden");
    }

    fn show_connector(&mut self, path: Option<&PathData>) {
        match path {
            Some(p) => log::info!("connector {p}"),
            None => log::info!("connector removed"),
        }
    }

    fn set_highlight(&mut self, path: &[NodeId]) {
        log::info!("highlighted {path:?}");
    }
}

/// Keeps the latest SVG path string of every edge.
#[derive(Debug, Default)]
struct SvgSurface {
    edges: Vec<(NodeId, String)>,
}

impl Surface for SvgSurface {
    fn place_node(&mut self, _: NodeId, _: NodePlacement) {}

    fn hide_node(&mut self, _: NodeId) {}

    fn draw_edge(&mut self, child: NodeId, path: &PathData) {
        match self.edges.iter_mut().find(|(id, _)| *id == child) {
            Some(entry) => entry.1 = path.to_svg(),
            None => self.edges.push((child, path.to_svg())),
        }
    }

    fn hide_edge(&mut self, child: NodeId) {
        self.edges.retain(|(id, _)| *id != child);
    }

    fn show_connector(&mut self, _: Option<&PathData>) {}
}

fn run(session: &mut Session, surface: &mut dyn Surface) {
    let mut frames = 0_usize;
    loop {
        frames += 1;
        match session.tick(FRAME, surface) {
            Progress::Idle => return,
            Progress::Running(_) => {}
            Progress::Finished(kind) => {
                log::info!("{kind:?} finished after {frames} frames");
                return;
            }
        }
    }
}

fn find(session: &Session, name: &str) -> Option<NodeId> {
    let tree = session.tree();
    tree.ids().find(|&id| tree.name(id) == Some(name))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut session = match Session::load(TREE, POINTS, StageConfig::default()) {
        Ok(s) => s,
        Err(e) => {
            log::error!("could not load the chart: {e}");
            return;
        }
    };
    let mut log_surface = LogSurface::default();
    let mut svg = SvgSurface::default();
    let mut surface = Fanout::new().with(&mut log_surface).with(&mut svg);

    session.render(&mut surface);
    log::info!("{} nodes, mode {}", session.tree().len(), session.mode());

    match session.begin_mode_switch() {
        Ok(mode) => log::info!("switching to {mode}"),
        Err(e) => log::warn!("{e}"),
    }
    run(&mut session, &mut surface);

    if let Some(liang) = find(&session, "Wang Liang") {
        match session.toggle(liang) {
            Ok(state) => log::info!("Wang Liang is now {state:?}"),
            Err(e) => log::warn!("{e}"),
        }
        run(&mut session, &mut surface);
        session.highlight_edge(liang, &mut surface);
    }

    if let (Some(an), Some(liang)) = (find(&session, "Wang An"), find(&session, "Wang Liang"))
        && session.drag_start(an, &mut surface)
    {
        let target = session.placement(liang).map_or(Point::ZERO, |p| p.center);
        let start = session.placement(an).map_or(target, |p| p.center);
        for step in 1..=10 {
            let pointer = start.lerp(target, f64::from(step) / 10.0);
            session.drag_move(an, pointer, &mut surface);
        }
        let outcome = session.drag_end(an, &mut surface);
        log::info!("drop: {outcome:?}");
        run(&mut session, &mut surface);

        let lineage = session.highlight_path(an, &mut surface);
        log::info!("Wang An now descends through {} generations", lineage.len());
    }

    match session.begin_mode_switch() {
        Ok(mode) => log::info!("switching to {mode}"),
        Err(e) => log::warn!("{e}"),
    }
    run(&mut session, &mut surface);

    log::info!("{} edge frames drawn", log_surface.frames);
    for (id, d) in &svg.edges {
        log::info!("<path data-child=\"{id}\" d=\"{d}\"/>");
    }
}
