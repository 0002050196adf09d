/// Identifier for a joint in a [`crate::graph::PathGraph`].
///
/// This is an index into `PathGraph::joints`, and is only meaningful within
/// the lifetime of a given `PathGraph` instance.
pub type JointId = usize;
