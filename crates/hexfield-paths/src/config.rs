use hexfield_core::{Context, Cuboid, HexCoord};

/// Rings searched beyond the origin-to-target distance by
/// [`SearchConfig::around`].
pub const DEFAULT_SEARCH_MARGIN: i32 = 32;

/// Tuning knobs for a [`PathFinder`](crate::PathFinder) search.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Hexes outside this region are never entered.
    ///
    /// Without a bound or [`max_expansions`](Self::max_expansions) the grid
    /// is unbounded, and a target that cannot be reached keeps the search
    /// running forever.
    pub bound: Option<Cuboid>,
    /// Put closed nodes back on the open queue when a cheaper route to them
    /// turns up. Only needed for an inconsistent heuristic or cost function;
    /// every reopening is logged as a warning.
    pub requeue_closed: bool,
    /// Give up after closing this many nodes.
    pub max_expansions: Option<usize>,
    /// Checked once per expanded node.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub context: Option<Context>,
}

impl SearchConfig {
    /// Configuration bounded to the disc around `origin` that reaches
    /// `target` with [`DEFAULT_SEARCH_MARGIN`] rings to spare. Routes that
    /// leave the disc are not found.
    pub fn around(origin: HexCoord, target: HexCoord) -> Self {
        let radius = origin.distance(target).saturating_add(DEFAULT_SEARCH_MARGIN);
        Self::default().with_bound(Cuboid::hex_range(origin, radius))
    }

    pub fn with_bound(mut self, bound: Cuboid) -> Self {
        self.bound = Some(bound);
        self
    }

    pub fn with_requeue_closed(mut self, requeue: bool) -> Self {
        self.requeue_closed = requeue;
        self
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn around_covers_both_ends() {
        let origin = HexCoord::new(-3, 2);
        let target = HexCoord::new(10, -4);
        let cfg = SearchConfig::around(origin, target);
        let bound = cfg.bound.unwrap();
        assert!(bound.contains(origin));
        assert!(bound.contains(target));
        assert!(bound.contains(target + HexCoord::new(DEFAULT_SEARCH_MARGIN, 0)));
        assert!(!bound.contains(origin + HexCoord::new(-100, 0)));
        assert!(!cfg.requeue_closed);
        assert!(cfg.max_expansions.is_none());
    }
}
