//! Indexed binary min-heap for search frontiers.
//!
//! The heap stores node ids; the nodes themselves live in a caller-owned
//! arena and remember their own position in the heap through
//! [`QueueNode::queue_index`]. That stored index makes membership tests O(1)
//! and lets a node be re-ordered in place after its key changes
//! (decrease-key), which `std::collections::BinaryHeap` cannot do.

/// A node that can be stored in a [`PriorityQueue`].
pub trait QueueNode {
    /// Ordering key. Smaller keys are dequeued first. Keys should be unique
    /// (include an insertion sequence) for a deterministic pop order.
    type Key: Ord;

    /// The node's current key.
    fn key(&self) -> Self::Key;

    /// Position in the heap array, or `None` when not queued.
    fn queue_index(&self) -> Option<usize>;

    /// Record the node's position in the heap array.
    fn set_queue_index(&mut self, index: Option<usize>);
}

const INITIAL_CAPACITY: usize = 16;

/// An array-backed indexed binary min-heap over node ids.
///
/// Every operation takes the node arena as an argument; ids index into it.
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    heap: Vec<usize>,
}

impl PriorityQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    /// Create an empty queue with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Number of queued nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Current capacity of the backing array.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// The id with the smallest key, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// Whether node `id` is currently queued.
    #[inline]
    pub fn contains<N: QueueNode>(&self, nodes: &[N], id: usize) -> bool {
        nodes[id]
            .queue_index()
            .is_some_and(|i| self.heap.get(i) == Some(&id))
    }

    /// Remove every node, clearing their stored indices.
    pub fn clear<N: QueueNode>(&mut self, nodes: &mut [N]) {
        for &id in &self.heap {
            nodes[id].set_queue_index(None);
        }
        self.heap.clear();
    }

    /// Insert node `id`.
    ///
    /// # Panics
    ///
    /// Panics if the node is already queued.
    pub fn enqueue<N: QueueNode>(&mut self, nodes: &mut [N], id: usize) {
        assert!(
            !self.contains(nodes, id),
            "node {id} is already in the priority queue"
        );
        if self.heap.len() == self.heap.capacity() {
            // Double the backing array.
            self.heap
                .reserve_exact(self.heap.capacity().max(INITIAL_CAPACITY));
        }
        let pos = self.heap.len();
        self.heap.push(id);
        nodes[id].set_queue_index(Some(pos));
        self.cascade_up(nodes, pos);
    }

    /// Remove and return the id with the smallest key.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty; check [`is_empty`](Self::is_empty)
    /// first.
    pub fn dequeue<N: QueueNode>(&mut self, nodes: &mut [N]) -> usize {
        assert!(!self.heap.is_empty(), "dequeue on an empty priority queue");
        let id = self.heap.swap_remove(0);
        nodes[id].set_queue_index(None);
        if let Some(&moved) = self.heap.first() {
            nodes[moved].set_queue_index(Some(0));
            self.cascade_down(nodes, 0);
        }
        id
    }

    /// Remove node `id` from anywhere in the queue.
    ///
    /// # Panics
    ///
    /// Panics if the node is not queued; check
    /// [`contains`](Self::contains) first.
    pub fn remove<N: QueueNode>(&mut self, nodes: &mut [N], id: usize) {
        let pos = self.position(nodes, id);
        let last = self.heap.len() - 1;
        if pos != last {
            self.swap(nodes, pos, last);
        }
        self.heap.pop();
        nodes[id].set_queue_index(None);
        if pos < self.heap.len() {
            self.restore(nodes, pos);
        }
    }

    /// Re-establish heap order after the key of queued node `id` changed.
    ///
    /// # Panics
    ///
    /// Panics if the node is not queued.
    pub fn on_node_updated<N: QueueNode>(&mut self, nodes: &mut [N], id: usize) {
        let pos = self.position(nodes, id);
        self.restore(nodes, pos);
    }

    fn position<N: QueueNode>(&self, nodes: &[N], id: usize) -> usize {
        match nodes[id].queue_index() {
            Some(pos) if self.heap.get(pos) == Some(&id) => pos,
            _ => panic!("node {id} is not in the priority queue"),
        }
    }

    fn restore<N: QueueNode>(&mut self, nodes: &mut [N], pos: usize) {
        if self.cascade_up(nodes, pos) == pos {
            self.cascade_down(nodes, pos);
        }
    }

    #[inline]
    fn less<N: QueueNode>(&self, nodes: &[N], a: usize, b: usize) -> bool {
        nodes[self.heap[a]].key() < nodes[self.heap[b]].key()
    }

    /// Swap two heap slots and update both stored indices.
    fn swap<N: QueueNode>(&mut self, nodes: &mut [N], a: usize, b: usize) {
        self.heap.swap(a, b);
        nodes[self.heap[a]].set_queue_index(Some(a));
        nodes[self.heap[b]].set_queue_index(Some(b));
    }

    fn cascade_up<N: QueueNode>(&mut self, nodes: &mut [N], mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(nodes, pos, parent) {
                break;
            }
            self.swap(nodes, pos, parent);
            pos = parent;
        }
        pos
    }

    fn cascade_down<N: QueueNode>(&mut self, nodes: &mut [N], mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(nodes, right, left) {
                right
            } else {
                left
            };
            if !self.less(nodes, child, pos) {
                break;
            }
            self.swap(nodes, pos, child);
            pos = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    #[derive(Debug, Clone)]
    struct TestNode {
        priority: u32,
        seq: u64,
        index: Option<usize>,
    }

    impl QueueNode for TestNode {
        type Key = (u32, u64);
        fn key(&self) -> (u32, u64) {
            (self.priority, self.seq)
        }
        fn queue_index(&self) -> Option<usize> {
            self.index
        }
        fn set_queue_index(&mut self, index: Option<usize>) {
            self.index = index;
        }
    }

    fn nodes(priorities: &[u32]) -> Vec<TestNode> {
        priorities
            .iter()
            .enumerate()
            .map(|(i, &p)| TestNode {
                priority: p,
                seq: i as u64,
                index: None,
            })
            .collect()
    }

    fn assert_heap(q: &PriorityQueue, nodes: &[TestNode]) {
        for (pos, &id) in q.heap.iter().enumerate() {
            assert_eq!(nodes[id].index, Some(pos), "stale index for node {id}");
            if pos > 0 {
                let parent = q.heap[(pos - 1) / 2];
                assert!(nodes[parent].key() <= nodes[id].key(), "heap order broken");
            }
        }
    }

    fn drain(q: &mut PriorityQueue, nodes: &mut [TestNode]) -> Vec<usize> {
        let mut out = Vec::new();
        while !q.is_empty() {
            out.push(q.dequeue(nodes));
        }
        out
    }

    #[test]
    fn dequeue_in_priority_order() {
        let mut ns = nodes(&[5, 3, 9, 1, 7]);
        let mut q = PriorityQueue::new();
        for id in 0..ns.len() {
            q.enqueue(&mut ns, id);
            assert_heap(&q, &ns);
        }
        assert_eq!(q.peek(), Some(3));
        assert_eq!(drain(&mut q, &mut ns), vec![3, 1, 0, 4, 2]);
        assert!(ns.iter().all(|n| n.index.is_none()));
    }

    #[test]
    fn equal_priorities_are_fifo() {
        let mut ns = nodes(&[2, 2, 1, 2, 1]);
        let mut q = PriorityQueue::new();
        for id in [3, 0, 4, 1, 2] {
            q.enqueue(&mut ns, id);
        }
        assert_eq!(drain(&mut q, &mut ns), vec![2, 4, 0, 1, 3]);
    }

    #[test]
    fn contains_tracks_membership() {
        let mut ns = nodes(&[1, 2]);
        let mut q = PriorityQueue::new();
        assert!(!q.contains(&ns, 0));
        q.enqueue(&mut ns, 0);
        assert!(q.contains(&ns, 0));
        assert!(!q.contains(&ns, 1));
        q.dequeue(&mut ns);
        assert!(!q.contains(&ns, 0));
    }

    #[test]
    fn remove_from_middle() {
        let mut ns = nodes(&[4, 8, 1, 6, 3, 9, 2]);
        let mut q = PriorityQueue::new();
        for id in 0..ns.len() {
            q.enqueue(&mut ns, id);
        }
        q.remove(&mut ns, 3);
        assert_heap(&q, &ns);
        q.remove(&mut ns, 2);
        assert_heap(&q, &ns);
        assert!(!q.contains(&ns, 3));
        assert_eq!(drain(&mut q, &mut ns), vec![6, 4, 0, 1, 5]);
    }

    #[test]
    fn remove_last_slot() {
        let mut ns = nodes(&[1, 2]);
        let mut q = PriorityQueue::new();
        q.enqueue(&mut ns, 0);
        q.enqueue(&mut ns, 1);
        q.remove(&mut ns, 1);
        assert_eq!(q.len(), 1);
        assert_heap(&q, &ns);
    }

    #[test]
    fn update_moves_node_both_ways() {
        let mut ns = nodes(&[10, 20, 30, 40, 50]);
        let mut q = PriorityQueue::new();
        for id in 0..ns.len() {
            q.enqueue(&mut ns, id);
        }
        ns[4].priority = 5;
        q.on_node_updated(&mut ns, 4);
        assert_heap(&q, &ns);
        assert_eq!(q.peek(), Some(4));

        ns[4].priority = 35;
        q.on_node_updated(&mut ns, 4);
        assert_heap(&q, &ns);
        assert_eq!(drain(&mut q, &mut ns), vec![0, 1, 2, 4, 3]);
    }

    #[test]
    fn storage_doubles_when_full() {
        let mut ns = nodes(&[0; 40]);
        let mut q = PriorityQueue::new();
        q.enqueue(&mut ns, 0);
        let cap = q.capacity();
        assert!(cap >= INITIAL_CAPACITY);
        for id in 1..=cap {
            q.enqueue(&mut ns, id);
        }
        assert!(q.capacity() >= 2 * cap);
    }

    #[test]
    fn clear_resets_indices() {
        let mut ns = nodes(&[3, 1, 2]);
        let mut q = PriorityQueue::new();
        for id in 0..3 {
            q.enqueue(&mut ns, id);
        }
        q.clear(&mut ns);
        assert!(q.is_empty());
        assert!(ns.iter().all(|n| n.index.is_none()));
    }

    #[test]
    fn random_operations_keep_heap_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut ns = nodes(&[0; 200]);
        for n in ns.iter_mut() {
            n.priority = rng.random_range(0..50u32);
        }
        let mut q = PriorityQueue::new();
        for step in 0..2000 {
            let id = rng.random_range(0..ns.len());
            match rng.random_range(0..4u32) {
                0 | 1 if !q.contains(&ns, id) => q.enqueue(&mut ns, id),
                2 if q.contains(&ns, id) => {
                    ns[id].priority = rng.random_range(0..50u32);
                    q.on_node_updated(&mut ns, id);
                }
                3 if q.contains(&ns, id) => q.remove(&mut ns, id),
                _ if !q.is_empty() && step % 3 == 0 => {
                    let min = q.peek().unwrap();
                    assert_eq!(q.dequeue(&mut ns), min);
                }
                _ => {}
            }
            assert_heap(&q, &ns);
        }
        let order = drain(&mut q, &mut ns);
        for pair in order.windows(2) {
            assert!(ns[pair[0]].key() < ns[pair[1]].key());
        }
    }

    #[test]
    #[should_panic(expected = "empty priority queue")]
    fn dequeue_empty_panics() {
        let mut ns = nodes(&[]);
        PriorityQueue::new().dequeue(&mut ns);
    }

    #[test]
    #[should_panic(expected = "not in the priority queue")]
    fn remove_absent_panics() {
        let mut ns = nodes(&[1]);
        PriorityQueue::new().remove(&mut ns, 0);
    }

    #[test]
    #[should_panic(expected = "already in the priority queue")]
    fn double_enqueue_panics() {
        let mut ns = nodes(&[1]);
        let mut q = PriorityQueue::new();
        q.enqueue(&mut ns, 0);
        q.enqueue(&mut ns, 0);
    }
}
