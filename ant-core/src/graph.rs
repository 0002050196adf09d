use crate::types::JointId;
use glam::Vec2;
use std::fmt;

/// Upper bound on outgoing connections of a single joint.
pub const MAX_CONNECTIONS: usize = 2;

#[derive(Debug, Clone)]
pub struct Joint {
    pub pos: Vec2,
    pub connections: Vec<JointId>,
    /// Visit counter per connection slot.
    pub selections: [u32; MAX_CONNECTIONS],
    /// Row index inside the joint's column. Only used while generating.
    pub row: usize,
}

#[derive(Debug, Default)]
pub struct PathGraph {
    pub joints: Vec<Joint>,
}

impl Joint {
    pub fn new(pos: Vec2, row: usize) -> Self {
        Self {
            pos,
            connections: Vec::with_capacity(MAX_CONNECTIONS),
            selections: [0; MAX_CONNECTIONS],
            row,
        }
    }

    /// A joint without outgoing connections ends every walk that reaches it.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.connections.is_empty()
    }
}

impl PathGraph {
    pub fn new() -> Self {
        Self { joints: Vec::new() }
    }

    pub fn add_joint(&mut self, pos: Vec2, row: usize) -> JointId {
        let id = self.joints.len();
        self.joints.push(Joint::new(pos, row));
        id
    }

    /// Appends `to` to the connections of `from`.
    ///
    /// Joints hold at most [`MAX_CONNECTIONS`] connections; further calls
    /// are ignored.
    pub fn connect(&mut self, from: JointId, to: JointId) {
        let joint = &mut self.joints[from];
        if joint.connections.len() < MAX_CONNECTIONS {
            joint.connections.push(to);
        }
    }

    #[inline]
    pub fn successors(&self, id: JointId) -> &[JointId] {
        &self.joints[id].connections
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}

/// Deduplication key of a [`DrawPath`]: both endpoints rounded to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey([i32; 4]);

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x1, y1, x2, y2] = self.0;
        write!(f, "{x1}_{y1}_{x2}_{y2}")
    }
}

/// A single straight segment of the rendered path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPath {
    pub from: Vec2,
    pub to: Vec2,
}

impl DrawPath {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey([
            self.from.x.round() as i32,
            self.from.y.round() as i32,
            self.to.x.round() as i32,
            self.to.y.round() as i32,
        ])
    }
}
