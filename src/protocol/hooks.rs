//! Dispatchable behavior points and their capability sets.
//!
//! A sub-block type declares at registration which hooks it participates in;
//! dispatch then filters a cluster's live elements against that set instead
//! of probing each element at call time. The aggregation policy is fixed per
//! hook kind, not configurable per instance.

use bitflags::bitflags;

bitflags! {
    /// Capability set computed once at registration time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HookSet: u16 {
        const ON_PLACED = 1 << 0;
        const ON_NEIGHBOR_CHANGE = 1 << 1;
        const CAN_CONNECT_REDSTONE = 1 << 2;
        const ON_ADDED = 1 << 3;
        const SHOULD_CHECK_WEAK_POWER = 1 << 4;
        const WEAK_POWER = 1 << 5;
        const STRONG_POWER = 1 << 6;
        const ON_ACTIVATED = 1 << 7;
    }
}

/// How a hook's per-element results combine into one cluster-level result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Logical OR, short-circuiting on the first `true`.
    Any,
    /// Maximum over participants, starting from a zero baseline.
    Max,
    /// Invoke every participant in element order; side effects only.
    Notify,
}

/// The closed set of behavior points a sub-block type can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    OnPlaced,
    OnNeighborChange,
    CanConnectRedstone,
    OnAdded,
    ShouldCheckWeakPower,
    WeakPower,
    StrongPower,
    OnActivated,
}

impl HookKind {
    /// Every hook kind, in declaration order.
    pub const ALL: [HookKind; 8] = [
        HookKind::OnPlaced,
        HookKind::OnNeighborChange,
        HookKind::CanConnectRedstone,
        HookKind::OnAdded,
        HookKind::ShouldCheckWeakPower,
        HookKind::WeakPower,
        HookKind::StrongPower,
        HookKind::OnActivated,
    ];

    /// The capability flag this kind occupies in a [`HookSet`].
    pub const fn flag(self) -> HookSet {
        match self {
            HookKind::OnPlaced => HookSet::ON_PLACED,
            HookKind::OnNeighborChange => HookSet::ON_NEIGHBOR_CHANGE,
            HookKind::CanConnectRedstone => HookSet::CAN_CONNECT_REDSTONE,
            HookKind::OnAdded => HookSet::ON_ADDED,
            HookKind::ShouldCheckWeakPower => HookSet::SHOULD_CHECK_WEAK_POWER,
            HookKind::WeakPower => HookSet::WEAK_POWER,
            HookKind::StrongPower => HookSet::STRONG_POWER,
            HookKind::OnActivated => HookSet::ON_ACTIVATED,
        }
    }

    /// Stable index for per-hook lookup tables.
    pub const fn index(self) -> usize {
        match self {
            HookKind::OnPlaced => 0,
            HookKind::OnNeighborChange => 1,
            HookKind::CanConnectRedstone => 2,
            HookKind::OnAdded => 3,
            HookKind::ShouldCheckWeakPower => 4,
            HookKind::WeakPower => 5,
            HookKind::StrongPower => 6,
            HookKind::OnActivated => 7,
        }
    }

    /// The result-combining policy fixed for this kind.
    pub const fn aggregation(self) -> Aggregation {
        match self {
            HookKind::OnPlaced | HookKind::OnNeighborChange | HookKind::OnAdded => {
                Aggregation::Notify
            }
            HookKind::CanConnectRedstone
            | HookKind::ShouldCheckWeakPower
            | HookKind::OnActivated => Aggregation::Any,
            HookKind::WeakPower | HookKind::StrongPower => Aggregation::Max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_distinct() {
        let mut seen = HookSet::empty();
        for kind in HookKind::ALL {
            assert!(!seen.intersects(kind.flag()));
            seen |= kind.flag();
        }
        assert_eq!(seen, HookSet::all());
    }

    #[test]
    fn indices_match_declaration_order() {
        for (i, kind) in HookKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn aggregation_policies_are_fixed_by_kind() {
        assert_eq!(HookKind::WeakPower.aggregation(), Aggregation::Max);
        assert_eq!(HookKind::StrongPower.aggregation(), Aggregation::Max);
        assert_eq!(HookKind::OnActivated.aggregation(), Aggregation::Any);
        assert_eq!(HookKind::OnNeighborChange.aggregation(), Aggregation::Notify);
    }
}
