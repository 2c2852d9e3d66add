use hexfield_core::{HexCoord, HexDirection};

/// Movement rules for a search: which hexes are blocked and what a step
/// costs.
///
/// Any `Fn(HexCoord) -> bool` closure is a pather with uniform step cost 1,
/// where the closure reports blocked hexes.
pub trait HexPather {
    /// Whether `c` cannot be entered.
    fn is_blocked(&self, c: HexCoord) -> bool;

    /// Cost of stepping from `from` in direction `dir`.
    fn step_cost(&self, _from: HexCoord, _dir: HexDirection) -> u32 {
        1
    }

    /// Lower bound of [`step_cost`](Self::step_cost) over the whole grid.
    fn min_step_cost(&self) -> u32 {
        1
    }

    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: HexCoord, to: HexCoord) -> u32 {
        (from.distance(to) as u32).saturating_mul(self.min_step_cost())
    }
}

impl<F> HexPather for F
where
    F: Fn(HexCoord) -> bool,
{
    #[inline]
    fn is_blocked(&self, c: HexCoord) -> bool {
        self(c)
    }
}
