use crate::{graph::PathGraph, types::JointId};
use glam::Vec2;
use rand::Rng;

/// A particle walking the path graph one joint at a time.
#[derive(Debug, Clone)]
pub struct Ant {
    pub pos: Vec2,
    /// Heading in radians, fixed when a destination is chosen.
    pub angle: f32,
    pub destination: Option<JointId>,
    pub exploring: bool,
    pub reached_end: bool,
}

/// Picks a branch at a joint with two connections.
///
/// Exploiting takes the branch visited less often (ties go to the first),
/// exploring uses the opposite comparison.
#[inline]
pub fn choose_branch(selections: [u32; 2], exploring: bool) -> usize {
    let first = if exploring {
        selections[0] >= selections[1]
    } else {
        selections[0] <= selections[1]
    };
    if first { 0 } else { 1 }
}

impl Ant {
    /// Places a new ant on `start` and immediately picks its first destination.
    pub fn new(
        graph: &mut PathGraph,
        start: JointId,
        exploration_probability: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let mut ant = Self {
            pos: graph.joints[start].pos,
            angle: 0.0,
            destination: None,
            exploring: false,
            reached_end: false,
        };
        ant.select_destination(graph, start, exploration_probability, rng);
        ant
    }

    /// Chooses the next joint to walk to from `from` and bumps that
    /// connection's visit counter.
    ///
    /// A joint without connections ends the walk.
    pub fn select_destination(
        &mut self,
        graph: &mut PathGraph,
        from: JointId,
        exploration_probability: f32,
        rng: &mut impl Rng,
    ) {
        self.exploring = false;

        let joint = &mut graph.joints[from];
        let slot = match joint.connections.len() {
            0 => {
                self.destination = None;
                self.reached_end = true;
                return;
            }
            1 => 0,
            _ => {
                let p = if exploration_probability.is_finite() {
                    f64::from(exploration_probability.clamp(0.0, 1.0))
                } else {
                    0.0
                };
                self.exploring = rng.random_bool(p);
                choose_branch(joint.selections, self.exploring)
            }
        };

        joint.selections[slot] += 1;
        let next = joint.connections[slot];
        self.destination = Some(next);
        self.orient_to(graph.joints[next].pos);
    }

    fn orient_to(&mut self, target: Vec2) {
        let d = target - self.pos;
        self.angle = d.y.atan2(d.x);
    }

    /// Advances the ant by one animation step of `speed` pixels.
    ///
    /// Arrival is detected on the x axis alone: paths only run left to
    /// right, so once the next step would pass the destination's x the ant
    /// picks a new destination instead of moving.
    pub fn advance(
        &mut self,
        graph: &mut PathGraph,
        speed: f32,
        exploration_probability: f32,
        rng: &mut impl Rng,
    ) {
        if self.reached_end {
            return;
        }
        let Some(dest) = self.destination else {
            self.reached_end = true;
            return;
        };

        let step = Vec2::from_angle(self.angle) * speed;
        if self.pos.x + step.x > graph.joints[dest].pos.x {
            self.select_destination(graph, dest, exploration_probability, rng);
        } else {
            self.pos += step;
        }
    }
}
