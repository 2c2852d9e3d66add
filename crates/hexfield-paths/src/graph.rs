use std::collections::HashMap;

use hexfield_core::{HexCoord, HexDirection};

use crate::node::SearchNode;
use crate::queue::PriorityQueue;

/// Index of a node in a [`SearchGraph`].
pub type NodeId = usize;

/// One step of a reconstructed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub coord: HexCoord,
    /// Direction of the step arriving here; `None` for the origin.
    pub direction: Option<HexDirection>,
    /// Cumulative cost from the origin.
    pub cost: u32,
}

/// Outcome of [`SearchGraph::relax`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    /// The candidate route was not better.
    Unchanged,
    /// The node took the cheaper route.
    Improved,
    /// The node was closed, took the cheaper route and went back on the
    /// open queue.
    Reopened,
}

/// Discovery structure of a single search: every node seen so far, keyed by
/// coordinate, plus the open queue over them.
///
/// A coordinate maps to at most one node; rediscovering it relaxes the
/// existing node.
#[derive(Debug, Default)]
pub struct SearchGraph {
    index: HashMap<HexCoord, NodeId>,
    nodes: Vec<SearchNode>,
    open: PriorityQueue,
    sequence: u64,
}

impl SearchGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every node, keeping allocations.
    pub fn clear(&mut self) {
        self.open.clear(&mut self.nodes);
        self.index.clear();
        self.nodes.clear();
        self.sequence = 0;
    }

    /// Number of discovered nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the open queue.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// All discovered nodes, in discovery order.
    #[inline]
    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    #[inline]
    pub fn id_of(&self, coord: HexCoord) -> Option<NodeId> {
        self.index.get(&coord).copied()
    }

    /// The node for `coord`, if discovered.
    #[inline]
    pub fn get(&self, coord: HexCoord) -> Option<&SearchNode> {
        self.id_of(coord).map(|id| &self.nodes[id])
    }

    #[inline]
    pub fn is_queued(&self, id: NodeId) -> bool {
        self.open.contains(&self.nodes, id)
    }

    fn push(&mut self, node: SearchNode) -> NodeId {
        assert!(
            !self.index.contains_key(&node.coord()),
            "{} is already discovered",
            node.coord()
        );
        let id = self.nodes.len();
        self.index.insert(node.coord(), id);
        self.nodes.push(node);
        self.open.enqueue(&mut self.nodes, id);
        id
    }

    fn next_sequence(&mut self) -> u64 {
        let s = self.sequence;
        self.sequence += 1;
        s
    }

    /// Add and queue the start node of a search.
    pub fn insert_origin(&mut self, coord: HexCoord, heuristic: u32) -> NodeId {
        let seq = self.next_sequence();
        self.push(SearchNode::origin(coord, heuristic, seq))
    }

    /// Add and queue a node first reached from `ancestor`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` was already discovered; use
    /// [`relax`](Self::relax) for that.
    pub fn discover(
        &mut self,
        coord: HexCoord,
        heuristic: u32,
        ancestor: NodeId,
        direction: HexDirection,
        step_cost: u32,
    ) -> NodeId {
        let seq = self.next_sequence();
        let node = SearchNode::discovered(
            coord,
            heuristic,
            seq,
            &self.nodes[ancestor],
            direction,
            step_cost,
        );
        self.push(node)
    }

    /// Offer `ancestor` as a cheaper route to node `id`.
    ///
    /// A queued node is re-ordered in place. A node that is not queued is
    /// only touched when `requeue` is set, in which case an improvement puts
    /// it back on the open queue.
    pub fn relax(
        &mut self,
        id: NodeId,
        ancestor: NodeId,
        direction: HexDirection,
        step_cost: u32,
        requeue: bool,
    ) -> Relaxation {
        let queued = self.open.contains(&self.nodes, id);
        if !queued && !requeue {
            return Relaxation::Unchanged;
        }
        let from = self.nodes[ancestor].clone();
        if !self.nodes[id].reconsider_ancestor(&from, direction, step_cost) {
            return Relaxation::Unchanged;
        }
        if queued {
            self.open.on_node_updated(&mut self.nodes, id);
            Relaxation::Improved
        } else {
            self.nodes[id].set_closed(false);
            self.open.enqueue(&mut self.nodes, id);
            Relaxation::Reopened
        }
    }

    /// Remove and return the open node with the lowest priority, or `None`
    /// when the open queue is exhausted.
    pub fn pop_open(&mut self) -> Option<NodeId> {
        if self.open.is_empty() {
            return None;
        }
        Some(self.open.dequeue(&mut self.nodes))
    }

    /// Mark node `id` as settled.
    #[inline]
    pub fn close(&mut self, id: NodeId) {
        self.nodes[id].set_closed(true);
    }

    /// Walk ancestor links back from `id` and return the route from the
    /// origin to `id`.
    pub fn path_to(&self, id: NodeId) -> Vec<PathStep> {
        let mut steps = Vec::new();
        let mut current = Some(id);
        // Ancestor links form a tree; the bound only guards against a
        // corrupted graph.
        while let Some(ci) = current {
            if steps.len() > self.nodes.len() {
                break;
            }
            let node = &self.nodes[ci];
            steps.push(PathStep {
                coord: node.coord(),
                direction: node.from_direction(),
                cost: node.path_cost(),
            });
            current = node.ancestor().and_then(|a| self.id_of(a));
        }
        steps.reverse();
        steps
    }
}
