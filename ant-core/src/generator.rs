//! Random layered path graph and its flattened edge set.
//!
//! A [`PathSystem`] is built in one go by [`PathSystem::generate`]:
//! 1. Lay out a head joint, `columns` interior columns of `rows` joints each,
//!    and a tail joint, left to right.
//! 2. Bind every joint of the previous active set to one or two joints of
//!    the current column (see [`bind_column`]).
//! 3. Connect whatever is still active after the last column to the tail.
//! 4. Walk the graph from the head and collect one [`DrawPath`] per
//!    distinct segment.

use crate::{
    config::Config,
    graph::{DrawPath, EdgeKey, PathGraph},
    random::random_in_interval,
    types::JointId,
};
use glam::Vec2;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug)]
pub struct PathSystem {
    graph: PathGraph,
    head: JointId,
    tail: JointId,
    grid: (usize, usize),
    extent: Vec2,
    edges: BTreeMap<EdgeKey, DrawPath>,
}

impl PathSystem {
    /// Generates a new path graph filling `extent` (width, height in pixels).
    ///
    /// Only `columns`, `rows` and `margin` are read from `cfg`. Zero-sized
    /// grids are treated as 1 x 1, and spacing never drops below one pixel so
    /// x always increases strictly from head to tail.
    pub fn generate(cfg: &Config, extent: Vec2, rng: &mut impl Rng) -> Self {
        let columns = cfg.columns.max(1);
        let rows = cfg.rows.max(1);
        let margin = if cfg.margin.is_finite() {
            cfg.margin.max(0.0)
        } else {
            0.0
        };

        let mid_y = (extent.y / 2.0).round();
        let dx = ((extent.x - 2.0 * margin) / (columns as f32 + 1.0))
            .round()
            .max(1.0);
        let dy = ((extent.y - 2.0 * margin) / (rows as f32 + 1.0))
            .round()
            .max(1.0);

        let mut graph = PathGraph::new();
        let head = graph.add_joint(Vec2::new(margin, mid_y), 0);

        let mut active = vec![head];
        let mut from_top = false;

        for c in 0..columns {
            let x = margin + (c as f32 + 1.0) * dx;
            let column: Vec<JointId> = (0..rows)
                .map(|r| graph.add_joint(Vec2::new(x, margin + (r as f32 + 1.0) * dy), r))
                .collect();

            // Alternate the scan direction so the graph doesn't lean one way.
            from_top = !from_top;
            let selected = bind_column(&mut graph, &active, &column, from_top, rng);

            active = column
                .iter()
                .zip(selected)
                .filter_map(|(&id, hit)| hit.then_some(id))
                .collect();
        }

        let tail_x = (extent.x - margin).max(margin + (columns as f32 + 1.0) * dx);
        let tail = graph.add_joint(Vec2::new(tail_x, mid_y), 0);
        for &id in &active {
            graph.connect(id, tail);
        }

        let edges = map_path_connections(&graph, head);

        debug!(
            columns,
            rows,
            joints = graph.len(),
            edges = edges.len(),
            "generated path system"
        );

        Self {
            graph,
            head,
            tail,
            grid: (columns, rows),
            extent,
            edges,
        }
    }

    pub fn head(&self) -> JointId {
        self.head
    }

    pub fn tail(&self) -> JointId {
        self.tail
    }

    pub fn graph(&self) -> &PathGraph {
        &self.graph
    }

    /// Mutable access for ants, which bump the per-connection visit counters.
    pub fn graph_mut(&mut self) -> &mut PathGraph {
        &mut self.graph
    }

    /// Grid shape the system was generated for, as `(columns, rows)`.
    pub fn grid(&self) -> (usize, usize) {
        self.grid
    }

    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    /// Distinct drawable segments, ordered by key.
    pub fn edges(&self) -> impl Iterator<Item = &DrawPath> {
        self.edges.values()
    }

    pub fn edge_keys(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.keys()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Connects each joint of `previous` to one or two joints of `column`.
///
/// When binding from the top, `previous` is scanned in order and the lowest
/// eligible row only moves down; from the bottom, `previous` is scanned in
/// reverse and the highest eligible row only moves up. The eligible window
/// never widens again inside a column, so edges of one column never cross.
///
/// Returns, per row of `column`, whether some joint selected it.
fn bind_column(
    graph: &mut PathGraph,
    previous: &[JointId],
    column: &[JointId],
    from_top: bool,
    rng: &mut impl Rng,
) -> Vec<bool> {
    let last = column.len() - 1;
    let mut selected = vec![false; column.len()];

    if from_top {
        let mut min = 0;
        for &joint in previous {
            let first = random_in_interval(rng, min, last);
            min = min.max(first);
            let second = random_in_interval(rng, min, last);
            min = min.max(second);
            link(graph, &mut selected, joint, column, first, second);
        }
    } else {
        let mut max = last;
        for &joint in previous.iter().rev() {
            let first = random_in_interval(rng, 0, max);
            max = max.min(first);
            let second = random_in_interval(rng, 0, max);
            max = max.min(second);
            link(graph, &mut selected, joint, column, first, second);
        }
    }

    selected
}

fn link(
    graph: &mut PathGraph,
    selected: &mut [bool],
    joint: JointId,
    column: &[JointId],
    first: usize,
    second: usize,
) {
    graph.connect(joint, column[first]);
    selected[first] = true;

    // A second pick landing on the same row is dropped.
    if graph.joints[column[second]].row != graph.joints[column[first]].row {
        graph.connect(joint, column[second]);
        selected[second] = true;
    }
}

/// Depth-first walk from `head` collecting one [`DrawPath`] per
/// (parent, child) step, keyed by coordinates.
fn map_path_connections(graph: &PathGraph, head: JointId) -> BTreeMap<EdgeKey, DrawPath> {
    let mut edges = BTreeMap::new();
    let mut visited = vec![false; graph.len()];
    let mut stack = vec![head];

    while let Some(id) = stack.pop() {
        if std::mem::replace(&mut visited[id], true) {
            continue;
        }
        let joint = &graph.joints[id];
        for &next in joint.connections.iter().rev() {
            let path = DrawPath::new(joint.pos, graph.joints[next].pos);
            edges.insert(path.key(), path);
            stack.push(next);
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn grid_config(columns: usize, rows: usize) -> Config {
        Config {
            columns,
            rows,
            ..Config::default()
        }
    }

    #[test]
    fn single_cell_grid_is_head_node_tail() {
        let mut rng = StdRng::seed_from_u64(1);
        let system = PathSystem::generate(&grid_config(1, 1), Vec2::new(800.0, 600.0), &mut rng);

        assert_eq!(system.edge_count(), 2);
        assert_eq!(system.graph().len(), 3);

        let head = system.head();
        let node = system.graph().successors(head)[0];
        assert_eq!(system.graph().successors(head).len(), 1);
        assert_eq!(system.graph().successors(node), &[system.tail()]);
        assert!(system.graph().joints[system.tail()].is_terminal());
    }

    #[test]
    fn layout_matches_margin_and_spacing() {
        let mut rng = StdRng::seed_from_u64(3);
        let cfg = grid_config(3, 4);
        let system = PathSystem::generate(&cfg, Vec2::new(840.0, 520.0), &mut rng);
        let joints = &system.graph().joints;

        // Head and tail sit on the vertical middle, inside the margin.
        assert_eq!(joints[system.head()].pos, Vec2::new(20.0, 260.0));
        assert_eq!(joints[system.tail()].pos, Vec2::new(820.0, 260.0));

        // dx = round(800 / 4) = 200, dy = round(480 / 5) = 96.
        assert_eq!(joints[1].pos, Vec2::new(220.0, 116.0));
        assert_eq!(joints[4].pos, Vec2::new(220.0, 404.0));
        assert_eq!(joints[5].pos, Vec2::new(420.0, 116.0));
    }

    #[test]
    fn zero_grid_is_treated_as_one_by_one() {
        let mut rng = StdRng::seed_from_u64(5);
        let system = PathSystem::generate(&grid_config(0, 0), Vec2::new(300.0, 200.0), &mut rng);
        assert_eq!(system.grid(), (1, 1));
        assert_eq!(system.edge_count(), 2);
    }

    #[test]
    fn tiny_extent_still_moves_strictly_right() {
        let mut rng = StdRng::seed_from_u64(9);
        let system = PathSystem::generate(&grid_config(20, 15), Vec2::new(10.0, 10.0), &mut rng);
        for edge in system.edges() {
            assert!(edge.to.x > edge.from.x, "edge goes backwards: {edge:?}");
        }
    }

    #[test]
    fn first_column_binds_rows_in_non_decreasing_order() {
        let mut graph = PathGraph::new();
        let previous: Vec<JointId> = (0..3).map(|r| graph.add_joint(Vec2::ZERO, r)).collect();
        let column: Vec<JointId> = (0..6)
            .map(|r| graph.add_joint(Vec2::new(10.0, r as f32), r))
            .collect();
        let mut rng = StdRng::seed_from_u64(21);

        let selected = bind_column(&mut graph, &previous, &column, true, &mut rng);

        let rows: Vec<usize> = previous
            .iter()
            .flat_map(|&p| graph.successors(p).iter().map(|&c| graph.joints[c].row))
            .collect();
        assert!(rows.windows(2).all(|w| w[0] <= w[1]), "rows: {rows:?}");

        // Exactly the rows somebody connected to are reported as selected.
        for (row, hit) in selected.iter().enumerate() {
            assert_eq!(*hit, rows.contains(&row));
        }
    }

    #[test]
    fn bottom_binding_scans_previous_in_reverse() {
        let mut graph = PathGraph::new();
        let previous: Vec<JointId> = (0..3).map(|r| graph.add_joint(Vec2::ZERO, r)).collect();
        let column: Vec<JointId> = (0..6)
            .map(|r| graph.add_joint(Vec2::new(10.0, r as f32), r))
            .collect();
        let mut rng = StdRng::seed_from_u64(22);

        bind_column(&mut graph, &previous, &column, false, &mut rng);

        // Walking the previous joints bottom-up, picked rows never go up.
        let rows: Vec<usize> = previous
            .iter()
            .rev()
            .flat_map(|&p| graph.successors(p).iter().map(|&c| graph.joints[c].row))
            .collect();
        assert!(rows.windows(2).all(|w| w[0] >= w[1]), "rows: {rows:?}");
        for &p in &previous {
            let n = graph.successors(p).len();
            assert!((1..=2).contains(&n));
        }
    }

    #[test]
    fn single_row_column_never_double_links() {
        let mut graph = PathGraph::new();
        let previous = vec![graph.add_joint(Vec2::ZERO, 0)];
        let column = vec![graph.add_joint(Vec2::new(10.0, 0.0), 0)];
        let mut rng = StdRng::seed_from_u64(0);

        let selected = bind_column(&mut graph, &previous, &column, true, &mut rng);

        assert_eq!(selected, vec![true]);
        assert_eq!(graph.successors(previous[0]), &[column[0]]);
    }

    #[test]
    fn edge_map_only_holds_reachable_pairs() {
        let mut rng = StdRng::seed_from_u64(77);
        let system = PathSystem::generate(&grid_config(8, 6), Vec2::new(1200.0, 700.0), &mut rng);
        let graph = system.graph();

        let mut reachable = vec![false; graph.len()];
        let mut stack = vec![system.head()];
        let mut expected = std::collections::BTreeSet::new();
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut reachable[id], true) {
                continue;
            }
            for &next in graph.successors(id) {
                expected.insert(DrawPath::new(graph.joints[id].pos, graph.joints[next].pos).key());
                stack.push(next);
            }
        }

        let keys: std::collections::BTreeSet<EdgeKey> = system.edge_keys().copied().collect();
        assert_eq!(keys, expected);
    }
}
