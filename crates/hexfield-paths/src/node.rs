use hexfield_core::{HexCoord, HexDirection};

use crate::queue::QueueNode;

/// Search priority of a node. Orders by the estimated total path cost
/// first, then by the turns taken to reach the node.
///
/// The derived ordering compares fields in declaration order, so `turns`
/// and `turning` only break ties between equal estimates, favouring routes
/// with fewer changes of direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priority {
    /// `heuristic + cost + cost_history`.
    pub estimate: u32,
    /// Turns accumulated before the last step.
    pub turns: u32,
    /// Whether the last step changed direction.
    pub turning: bool,
}

/// What a node would look like if reached through a given ancestor.
#[derive(Debug, Clone, Copy)]
struct Arrival {
    cost: u32,
    cost_history: u32,
    from_direction: HexDirection,
    ancestor: HexCoord,
    turning: bool,
    turn_history: u32,
}

impl Arrival {
    fn through(ancestor: &SearchNode, direction: HexDirection, step_cost: u32) -> Self {
        Self {
            cost: step_cost,
            cost_history: ancestor.path_cost(),
            from_direction: direction,
            ancestor: ancestor.coord,
            turning: ancestor.from_direction.is_some_and(|d| d != direction),
            turn_history: ancestor.turn_history + u32::from(ancestor.turning),
        }
    }

    fn priority(&self, heuristic: u32) -> Priority {
        Priority {
            estimate: heuristic
                .saturating_add(self.cost)
                .saturating_add(self.cost_history),
            turns: self.turn_history,
            turning: self.turning,
        }
    }
}

/// Per-hex record of a single search: best known route, heuristic and
/// heap bookkeeping.
///
/// The ancestor is stored as a coordinate, so the discovery graph holds no
/// references between nodes and can be inspected or serialized freely.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNode {
    coord: HexCoord,
    cost: u32,
    cost_history: u32,
    heuristic: u32,
    from_direction: Option<HexDirection>,
    ancestor: Option<HexCoord>,
    turning: bool,
    turn_history: u32,
    queue_index: Option<usize>,
    sequence: u64,
    closed: bool,
}

impl SearchNode {
    /// The node a search starts from: no ancestor, zero cost.
    pub fn origin(coord: HexCoord, heuristic: u32, sequence: u64) -> Self {
        Self {
            coord,
            cost: 0,
            cost_history: 0,
            heuristic,
            from_direction: None,
            ancestor: None,
            turning: false,
            turn_history: 0,
            queue_index: None,
            sequence,
            closed: false,
        }
    }

    /// A node first discovered by stepping from `ancestor` in `direction`.
    pub fn discovered(
        coord: HexCoord,
        heuristic: u32,
        sequence: u64,
        ancestor: &SearchNode,
        direction: HexDirection,
        step_cost: u32,
    ) -> Self {
        let mut node = Self::origin(coord, heuristic, sequence);
        node.adopt(Arrival::through(ancestor, direction, step_cost));
        node
    }

    #[inline]
    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    /// Cost of the last step, from the ancestor to this node.
    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Accumulated cost up to the ancestor.
    #[inline]
    pub fn cost_history(&self) -> u32 {
        self.cost_history
    }

    /// Total cost from the origin to this node.
    #[inline]
    pub fn path_cost(&self) -> u32 {
        self.cost_history.saturating_add(self.cost)
    }

    #[inline]
    pub fn heuristic(&self) -> u32 {
        self.heuristic
    }

    /// Direction of the step that reached this node; `None` for the origin.
    #[inline]
    pub fn from_direction(&self) -> Option<HexDirection> {
        self.from_direction
    }

    #[inline]
    pub fn ancestor(&self) -> Option<HexCoord> {
        self.ancestor
    }

    #[inline]
    pub fn turning(&self) -> bool {
        self.turning
    }

    #[inline]
    pub fn turn_history(&self) -> u32 {
        self.turn_history
    }

    /// Discovery order within the search; breaks priority ties.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub(crate) fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn priority(&self) -> Priority {
        Priority {
            estimate: self
                .heuristic
                .saturating_add(self.cost)
                .saturating_add(self.cost_history),
            turns: self.turn_history,
            turning: self.turning,
        }
    }

    /// Consider `ancestor` as a new predecessor, reached by a step in
    /// `direction` costing `step_cost`. The node is updated in place when the
    /// resulting priority is strictly lower than its current one.
    ///
    /// Returns whether the node changed. Keeping the heap in order afterwards
    /// is the caller's job (see [`PriorityQueue::on_node_updated`]).
    ///
    /// [`PriorityQueue::on_node_updated`]: crate::PriorityQueue::on_node_updated
    pub fn reconsider_ancestor(
        &mut self,
        ancestor: &SearchNode,
        direction: HexDirection,
        step_cost: u32,
    ) -> bool {
        let arrival = Arrival::through(ancestor, direction, step_cost);
        if arrival.priority(self.heuristic) < self.priority() {
            self.adopt(arrival);
            true
        } else {
            false
        }
    }

    fn adopt(&mut self, arrival: Arrival) {
        self.cost = arrival.cost;
        self.cost_history = arrival.cost_history;
        self.from_direction = Some(arrival.from_direction);
        self.ancestor = Some(arrival.ancestor);
        self.turning = arrival.turning;
        self.turn_history = arrival.turn_history;
    }
}

impl QueueNode for SearchNode {
    type Key = (Priority, u64);

    #[inline]
    fn key(&self) -> (Priority, u64) {
        (self.priority(), self.sequence)
    }

    #[inline]
    fn queue_index(&self) -> Option<usize> {
        self.queue_index
    }

    #[inline]
    fn set_queue_index(&mut self, index: Option<usize>) {
        self.queue_index = index;
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn node_round_trip() {
        let o = SearchNode::origin(HexCoord::new(2, -1), 3, 0);
        let n = SearchNode::discovered(HexCoord::new(3, -1), 2, 1, &o, HexDirection::East, 1);
        let json = serde_json::to_string(&n).unwrap();
        let back: SearchNode = serde_json::from_str(&json).unwrap();
        assert_eq!(n, back);
    }
}
