//! Numeric bound satisfied by edge capacities and flow values, plus the
//! saturating "infinite capacity" sentinel used throughout the residual
//! graph machinery.

use num_traits::{Bounded, One, Signed, Zero};

/// Numbers usable as edge capacities and flow values.
///
/// Capacities must support negation (the residual graph stores negative
/// flow on reverse arcs), a total order (augmenting paths compare
/// bottleneck capacities), and a maximum value (used as the starting
/// "unconstrained" bottleneck before a path is walked). This mirrors the
/// bound the teacher's own Edmonds-Karp implementation puts on its `C`
/// type parameter.
pub trait Capacity: Zero + One + Bounded + Signed + Ord + Copy {}

impl<T> Capacity for T where T: Zero + One + Bounded + Signed + Ord + Copy {}

/// Computes the `INF` sentinel for a graph: the sum of every finite
/// capacity incident to any vertex, or `1` if that sum is not positive.
///
/// Arcs whose original edge carried no capacity attribute are assigned
/// this sentinel. It is deliberately *not* a floating-point infinity —
/// mixing a true infinity with finite integer capacities breaks ordinary
/// comparisons and arithmetic, whereas a large finite sentinel composes
/// with the rest of `C`'s arithmetic and still dominates every possible
/// finite max-flow value.
pub fn infinite_capacity<C: Capacity>(finite_capacities: impl IntoIterator<Item = C>) -> C {
    let total = finite_capacities
        .into_iter()
        .fold(C::zero(), |acc, c| acc + c);
    if total > C::zero() {
        total
    } else {
        C::one()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_finite_capacities() {
        let inf: i64 = infinite_capacity([3, 4, 5]);
        assert_eq!(inf, 12);
    }

    #[test]
    fn falls_back_to_one_when_empty() {
        let inf: i64 = infinite_capacity(Vec::new());
        assert_eq!(inf, 1);
    }

    #[test]
    fn falls_back_to_one_when_nonpositive() {
        let inf: i64 = infinite_capacity([0, 0]);
        assert_eq!(inf, 1);
    }
}
