use hexfield_core::{HexCoord, HexDirection};

use crate::config::SearchConfig;
use crate::graph::{NodeId, PathStep, Relaxation, SearchGraph};
use crate::traits::HexPather;

/// Where a [`PathFinder`] stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// The open queue still holds nodes.
    Searching,
    /// The target was reached.
    Found,
    /// The open queue ran dry before reaching the target.
    Exhausted,
    /// The context was cancelled or the expansion budget ran out.
    Cancelled,
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes popped and closed.
    pub expanded: usize,
    /// Nodes created, origin included.
    pub discovered: usize,
    /// Successful relaxations, reopenings included.
    pub relaxed: usize,
    /// Closed nodes put back on the open queue.
    pub reopened: usize,
}

/// A route from origin to target. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// Steps in order from origin to target.
    #[inline]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Coordinates in order from origin to target.
    pub fn coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.steps.iter().map(|s| s.coord)
    }

    /// Number of coordinates, origin and target included.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Cumulative cost at the target.
    #[inline]
    pub fn total_cost(&self) -> u32 {
        self.steps.last().map_or(0, |s| s.cost)
    }

    #[inline]
    pub fn origin(&self) -> HexCoord {
        self.steps[0].coord
    }

    #[inline]
    pub fn target(&self) -> HexCoord {
        self.steps[self.steps.len() - 1].coord
    }

    pub fn into_steps(self) -> Vec<PathStep> {
        self.steps
    }
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    Found(Path),
    /// No route exists within the search bound.
    Exhausted,
    Cancelled,
}

impl PathOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            PathOutcome::Found(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            PathOutcome::Found(p) => Some(p),
            _ => None,
        }
    }
}

/// A* search from `origin` to `target`, driven one expansion at a time.
///
/// ```
/// use hexfield_core::HexCoord;
/// use hexfield_paths::{PathFinder, SearchState};
///
/// let wall = HexCoord::new(1, 0);
/// let blocked = move |c: HexCoord| c == wall;
/// let mut finder = PathFinder::new(&blocked, HexCoord::ZERO, HexCoord::new(2, 0));
/// while finder.step() == SearchState::Searching {}
/// let path = finder.outcome().unwrap().into_path().unwrap();
/// assert_eq!(path.total_cost(), 3);
/// ```
pub struct PathFinder<'a, P: HexPather + ?Sized> {
    pather: &'a P,
    origin: HexCoord,
    target: HexCoord,
    config: SearchConfig,
    graph: SearchGraph,
    state: SearchState,
    stats: SearchStats,
    found: Option<NodeId>,
}

impl<'a, P: HexPather + ?Sized> PathFinder<'a, P> {
    /// Start a search bounded by [`SearchConfig::around`].
    pub fn new(pather: &'a P, origin: HexCoord, target: HexCoord) -> Self {
        Self::with_config(pather, origin, target, SearchConfig::around(origin, target))
    }

    /// Start a search; the origin is queued immediately.
    ///
    /// A blocked target other than the origin can never be entered, so the
    /// search is exhausted from the start.
    pub fn with_config(
        pather: &'a P,
        origin: HexCoord,
        target: HexCoord,
        config: SearchConfig,
    ) -> Self {
        let mut graph = SearchGraph::new();
        graph.insert_origin(origin, pather.estimate(origin, target));
        log::debug!("path search {origin} -> {target} started");
        let mut finder = Self {
            pather,
            origin,
            target,
            config,
            graph,
            state: SearchState::Searching,
            stats: SearchStats {
                discovered: 1,
                ..SearchStats::default()
            },
            found: None,
        };
        if origin != target && pather.is_blocked(target) {
            finder.finish(SearchState::Exhausted);
        }
        finder
    }

    #[inline]
    pub fn origin(&self) -> HexCoord {
        self.origin
    }

    #[inline]
    pub fn target(&self) -> HexCoord {
        self.target
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The discovery structure built so far.
    #[inline]
    pub fn graph(&self) -> &SearchGraph {
        &self.graph
    }

    /// Expand one node. Does nothing once the search has finished.
    pub fn step(&mut self) -> SearchState {
        if self.state != SearchState::Searching {
            return self.state;
        }
        if self.config.context.as_ref().is_some_and(|c| c.is_done()) {
            return self.finish(SearchState::Cancelled);
        }
        if self
            .config
            .max_expansions
            .is_some_and(|max| self.stats.expanded >= max)
        {
            log::debug!(
                "path search {} -> {} hit the expansion limit",
                self.origin,
                self.target
            );
            return self.finish(SearchState::Cancelled);
        }
        let Some(current) = self.graph.pop_open() else {
            return self.finish(SearchState::Exhausted);
        };
        let coord = self.graph.node(current).coord();
        if coord == self.target {
            self.found = Some(current);
            return self.finish(SearchState::Found);
        }

        self.graph.close(current);
        self.stats.expanded += 1;
        log::trace!(
            "expand {coord} at cost {}",
            self.graph.node(current).path_cost()
        );

        for dir in HexDirection::ALL {
            let next = coord.neighbor(dir);
            if self.config.bound.is_some_and(|b| !b.contains(next)) {
                continue;
            }
            let seen = self.graph.id_of(next);
            if seen.is_some_and(|id| self.graph.node(id).is_closed()) && !self.config.requeue_closed
            {
                continue;
            }
            if self.pather.is_blocked(next) {
                continue;
            }
            let step_cost = self.pather.step_cost(coord, dir);
            match seen {
                None => {
                    let heuristic = self.pather.estimate(next, self.target);
                    self.graph.discover(next, heuristic, current, dir, step_cost);
                    self.stats.discovered += 1;
                }
                Some(id) => {
                    match self
                        .graph
                        .relax(id, current, dir, step_cost, self.config.requeue_closed)
                    {
                        Relaxation::Unchanged => {}
                        Relaxation::Improved => self.stats.relaxed += 1,
                        Relaxation::Reopened => {
                            self.stats.relaxed += 1;
                            self.stats.reopened += 1;
                            log::warn!(
                                "reopened closed node {next}: the cost estimate is not consistent"
                            );
                        }
                    }
                }
            }
        }
        self.state
    }

    fn finish(&mut self, state: SearchState) -> SearchState {
        self.state = state;
        log::debug!(
            "path search {} -> {} finished: {:?} ({:?})",
            self.origin,
            self.target,
            state,
            self.stats
        );
        state
    }

    /// Step until the search finishes and return its outcome.
    pub fn run(&mut self) -> PathOutcome {
        while self.step() == SearchState::Searching {}
        self.finished_outcome()
    }

    /// The outcome, or `None` while the search is still running.
    pub fn outcome(&self) -> Option<PathOutcome> {
        (self.state != SearchState::Searching).then(|| self.finished_outcome())
    }

    fn finished_outcome(&self) -> PathOutcome {
        match (self.state, self.found) {
            (SearchState::Found, Some(id)) => PathOutcome::Found(Path {
                steps: self.graph.path_to(id),
            }),
            (SearchState::Cancelled, _) => PathOutcome::Cancelled,
            _ => PathOutcome::Exhausted,
        }
    }
}

/// Shortest path from `origin` to `target` with uniform step cost 1,
/// avoiding hexes for which `is_blocked` returns `true`.
///
/// The search stays inside [`SearchConfig::around`], so it always ends; use
/// [`find_path_with`] with an explicit bound for routes that wander further.
pub fn find_path(
    origin: HexCoord,
    target: HexCoord,
    is_blocked: impl Fn(HexCoord) -> bool,
) -> PathOutcome {
    PathFinder::new(&is_blocked, origin, target).run()
}

/// Shortest path using a custom [`HexPather`] and [`SearchConfig`].
pub fn find_path_with<P: HexPather + ?Sized>(
    pather: &P,
    origin: HexCoord,
    target: HexCoord,
    config: SearchConfig,
) -> PathOutcome {
    PathFinder::with_config(pather, origin, target, config).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexfield_core::{Context, Cuboid};
    use std::collections::HashSet;

    fn open(_: HexCoord) -> bool {
        false
    }

    fn assert_adjacent(path: &Path) {
        let coords: Vec<_> = path.coords().collect();
        for pair in coords.windows(2) {
            assert_eq!(pair[0].distance(pair[1]), 1, "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn same_origin_and_target() {
        let c = HexCoord::new(5, 5);
        let path = find_path(c, c, open).into_path().unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.total_cost(), 0);
        assert_eq!(path.steps()[0].direction, None);
    }

    #[test]
    fn straight_line() {
        let path = find_path(HexCoord::ZERO, HexCoord::new(5, 0), open)
            .into_path()
            .unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.total_cost(), 5);
        assert_eq!(path.origin(), HexCoord::ZERO);
        assert_eq!(path.target(), HexCoord::new(5, 0));
        assert!(
            path.steps()[1..]
                .iter()
                .all(|s| s.direction == Some(HexDirection::East))
        );
        assert_adjacent(&path);
    }

    #[test]
    fn detour_around_single_block() {
        let wall = HexCoord::new(1, 0);
        let outcome = find_path(HexCoord::ZERO, HexCoord::new(2, 0), |c| c == wall);
        let path = outcome.path().unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.total_cost(), 3);
        let coords: Vec<_> = path.coords().collect();
        assert!(!coords.contains(&wall));
        assert!(
            coords.contains(&HexCoord::new(1, -1)) || coords.contains(&HexCoord::new(1, 1)),
            "{coords:?}"
        );
        assert_adjacent(path);
        let costs: Vec<_> = path.steps().iter().map(|s| s.cost).collect();
        assert_eq!(costs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn enclosed_target_is_exhausted() {
        let target = HexCoord::new(4, 4);
        let ring: HashSet<_> = target.neighbors().into_iter().collect();
        let bound = Cuboid::hex_range(HexCoord::ZERO, 10);
        let config = SearchConfig::default().with_bound(bound);
        let blocked = |c: HexCoord| ring.contains(&c);
        let outcome = find_path_with(&blocked, HexCoord::ZERO, target, config);
        assert_eq!(outcome, PathOutcome::Exhausted);
        assert!(outcome.path().is_none());
    }

    #[test]
    fn enclosed_target_is_exhausted_without_config() {
        let target = HexCoord::new(4, 4);
        let ring: HashSet<_> = target.neighbors().into_iter().collect();
        let blocked = |c: HexCoord| ring.contains(&c);
        let mut finder = PathFinder::new(&blocked, HexCoord::ZERO, target);
        assert_eq!(finder.run(), PathOutcome::Exhausted);
        let searched = SearchConfig::around(HexCoord::ZERO, target).bound.unwrap();
        assert!(finder.stats().expanded <= searched.len());
        assert_eq!(find_path(HexCoord::ZERO, target, blocked), PathOutcome::Exhausted);
    }

    #[test]
    fn blocked_target_is_exhausted_at_once() {
        let target = HexCoord::new(3, 0);
        let blocked = |c: HexCoord| c == target;
        let mut finder = PathFinder::new(&blocked, HexCoord::ZERO, target);
        assert_eq!(finder.state(), SearchState::Exhausted);
        assert_eq!(finder.outcome(), Some(PathOutcome::Exhausted));
        assert_eq!(finder.run(), PathOutcome::Exhausted);
        assert_eq!(finder.stats().expanded, 0);

        let unbounded = find_path_with(&blocked, HexCoord::ZERO, target, SearchConfig::default());
        assert_eq!(unbounded, PathOutcome::Exhausted);
        assert_eq!(find_path(HexCoord::ZERO, target, blocked), PathOutcome::Exhausted);
    }

    #[test]
    fn blocked_origin_equal_to_target_is_found() {
        let c = HexCoord::new(1, 1);
        let outcome = find_path(c, c, |_| true);
        assert_eq!(outcome.path().map(Path::total_cost), Some(0));
    }

    #[test]
    fn bound_limits_the_search() {
        // Wall across the disc except far outside the bound.
        let blocked = |c: HexCoord| c.q == 2 && c.r > -6;
        let target = HexCoord::new(4, 0);
        let unbounded = find_path(HexCoord::ZERO, target, blocked);
        assert!(unbounded.is_found());

        let config = SearchConfig::default().with_bound(Cuboid::hex_range(HexCoord::ZERO, 5));
        let bounded = find_path_with(&blocked, HexCoord::ZERO, target, config);
        assert_eq!(bounded, PathOutcome::Exhausted);
    }

    #[test]
    fn state_machine_transitions() {
        let target = HexCoord::new(2, 0);
        let mut finder = PathFinder::new(&open, HexCoord::ZERO, target);
        assert_eq!(finder.state(), SearchState::Searching);
        assert_eq!(finder.outcome(), None);
        assert_eq!(finder.step(), SearchState::Searching);
        assert_eq!(finder.stats().expanded, 1);
        assert_eq!(finder.stats().discovered, 7);
        let outcome = finder.run();
        assert!(outcome.is_found());
        assert_eq!(finder.state(), SearchState::Found);
        // Further steps are no-ops.
        assert_eq!(finder.step(), SearchState::Found);
        assert_eq!(finder.outcome(), Some(outcome));
    }

    #[test]
    fn cancelled_context_stops_search() {
        let ctx = Context::new();
        ctx.cancel();
        let config = SearchConfig::default().with_context(ctx);
        let outcome = find_path_with(&open, HexCoord::ZERO, HexCoord::new(9, 0), config);
        assert_eq!(outcome, PathOutcome::Cancelled);
    }

    #[test]
    fn expansion_limit_stops_search() {
        let config = SearchConfig::default().with_max_expansions(3);
        let blocked = |c: HexCoord| c.q == 3;
        let mut finder = PathFinder::with_config(&blocked, HexCoord::ZERO, HexCoord::new(6, 0), config);
        assert_eq!(finder.run(), PathOutcome::Cancelled);
        assert_eq!(finder.stats().expanded, 3);
    }

    #[test]
    fn fewest_turns_among_equal_costs() {
        let path = find_path(HexCoord::ZERO, HexCoord::new(2, 1), open)
            .into_path()
            .unwrap();
        assert_eq!(path.total_cost(), 3);
        let dirs: Vec<_> = path.steps()[1..].iter().map(|s| s.direction).collect();
        let turns = dirs.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(turns, 1, "{dirs:?}");
    }

    struct Swamp {
        swamp: HashSet<HexCoord>,
    }

    impl HexPather for Swamp {
        fn is_blocked(&self, _: HexCoord) -> bool {
            false
        }

        fn step_cost(&self, from: HexCoord, dir: HexDirection) -> u32 {
            if self.swamp.contains(&from.neighbor(dir)) {
                5
            } else {
                1
            }
        }
    }

    #[test]
    fn weighted_steps_prefer_cheap_route() {
        let swamp: HashSet<_> = [HexCoord::new(1, 0), HexCoord::new(2, 0)].into();
        let pather = Swamp { swamp };
        let outcome = find_path_with(
            &pather,
            HexCoord::ZERO,
            HexCoord::new(3, 0),
            SearchConfig::default(),
        );
        let path = outcome.into_path().unwrap();
        assert_eq!(path.total_cost(), 4);
        assert!(path.coords().all(|c| !pather.swamp.contains(&c)));
    }

    /// Five open hexes where the cheap route to `A` is only found after `A`
    /// was closed, because the estimate at `Y` overshoots the one at `A` by
    /// more than the step between them.
    struct Inconsistent;

    const O: HexCoord = HexCoord::new(0, 0);
    const A: HexCoord = HexCoord::new(1, 0);
    const X: HexCoord = HexCoord::new(1, -1);
    const Y: HexCoord = HexCoord::new(0, 1);
    const T: HexCoord = HexCoord::new(2, 0);

    impl HexPather for Inconsistent {
        fn is_blocked(&self, c: HexCoord) -> bool {
            ![O, A, X, Y, T].contains(&c)
        }

        fn step_cost(&self, from: HexCoord, dir: HexDirection) -> u32 {
            match (from, from.neighbor(dir)) {
                (O, A) => 10,
                (X, A) => 2,
                (_, T) => 5,
                _ => 1,
            }
        }

        fn estimate(&self, from: HexCoord, _to: HexCoord) -> u32 {
            if from == Y { 5 } else { 0 }
        }
    }

    #[test]
    fn requeue_reopens_closed_nodes() {
        let config = SearchConfig::default().with_requeue_closed(true);
        let mut finder = PathFinder::with_config(&Inconsistent, O, T, config);
        let path = finder.run().into_path().unwrap();
        // O -> Y -> A -> T is the cheapest route: 1 + 1 + 5.
        assert_eq!(path.total_cost(), 7);
        assert_eq!(path.coords().collect::<Vec<_>>(), vec![O, Y, A, T]);
        assert_eq!(finder.stats().reopened, 1);
        assert!(finder.stats().relaxed >= 2);
    }

    #[test]
    fn closed_nodes_are_final_by_default() {
        let mut finder = PathFinder::with_config(&Inconsistent, O, T, SearchConfig::default());
        let path = finder.run().into_path().unwrap();
        assert_eq!(path.total_cost(), 8);
        assert_eq!(path.coords().collect::<Vec<_>>(), vec![O, X, A, T]);
        assert_eq!(finder.stats().reopened, 0);
    }

    #[test]
    fn deterministic_results() {
        let blocked = |c: HexCoord| (c.q * 7 + c.r * 3).rem_euclid(5) == 0 && c != HexCoord::ZERO;
        let target = HexCoord::new(6, -2);
        let a = find_path(HexCoord::ZERO, target, blocked);
        let b = find_path(HexCoord::ZERO, target, blocked);
        assert_eq!(a, b);
    }
}
