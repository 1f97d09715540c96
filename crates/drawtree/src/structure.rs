//! Graph normalization ahead of layout.
//!
//! Two passes run in order on the parsed graph:
//!
//! 1. [`link_orphans`] - Connects every extra root to a single main root.
//! 2. [`assign_levels`] - Records each node's breadth-first depth from that root.
//!
//! Both take the graph by value and hand it back, so the graph has exactly
//! one owner at every stage.

mod levels;
mod normalize;

pub use levels::assign_levels;
pub use normalize::link_orphans;

use drawtree_core::graph::Graph;

/// Runs both passes: orphan linking, then level assignment.
pub fn prepare(graph: Graph) -> Graph {
    assign_levels(link_orphans(graph))
}
