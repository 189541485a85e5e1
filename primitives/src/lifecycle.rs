//! Keyed-entity lifecycle shared by challenges, matches and proposals.
//!
//! ```text
//!            ┌──────────► Verified
//!   Active ──┼──────────► Disputed
//!            └──────────► Finalized
//! ```
//!
//! `Active` is the only phase that accepts contributions. Every other phase
//! is terminal and is never left once entered.

use crate::EntityId;
use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

#[derive(
    Clone, Copy, PartialEq, Eq,
    Encode, Decode, MaxEncodedLen, TypeInfo, Debug,
)]
pub enum Phase {
    /// Open for joins, claims, verifications and votes.
    Active,
    /// Accumulated verification weight reached its threshold.
    Verified,
    /// Accumulated dispute weight reached its threshold.
    Disputed,
    /// Closed by an authorized call after its window elapsed.
    Finalized,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Active
    }
}

/// Rejected phase change.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PhaseError {
    pub from: Phase,
    pub to: Phase,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        self != Phase::Active
    }

    pub fn can_transition_to(self, to: Phase) -> bool {
        self == Phase::Active && to != Phase::Active
    }

    pub fn transition(&mut self, to: Phase) -> Result<(), PhaseError> {
        if !self.can_transition_to(to) {
            return Err(PhaseError { from: *self, to });
        }
        *self = to;
        Ok(())
    }
}

/// Inclusive `[start, end]` window measured in ledger rounds.
#[derive(
    Clone, Copy, PartialEq, Eq, Default,
    Encode, Decode, MaxEncodedLen, TypeInfo, Debug,
)]
pub struct Window<BlockNumber> {
    pub start: BlockNumber,
    pub end: BlockNumber,
}

impl<BlockNumber: Copy + PartialOrd + sp_runtime::traits::CheckedAdd> Window<BlockNumber> {
    /// Returns `None` if `end` precedes `start`.
    pub fn new(start: BlockNumber, end: BlockNumber) -> Option<Self> {
        if end < start {
            return None;
        }
        Some(Self { start, end })
    }

    /// A window opening at `now` and closing `duration` rounds later.
    pub fn starting_at(now: BlockNumber, duration: BlockNumber) -> Option<Self> {
        let end = now.checked_add(&duration)?;
        Some(Self { start: now, end })
    }

    pub fn is_open(&self, now: BlockNumber) -> bool {
        self.start <= now && now <= self.end
    }

    pub fn has_elapsed(&self, now: BlockNumber) -> bool {
        now > self.end
    }
}

/// Next id of a kind whose last assigned id is `last`. Ids start at 1.
///
/// Overflow yields `None`; an id is never reused.
pub fn next_id(last: EntityId) -> Option<EntityId> {
    last.checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_only_leave_active() {
        let mut phase = Phase::default();
        assert!(!phase.is_terminal());
        assert_eq!(phase.transition(Phase::Verified), Ok(()));
        assert!(phase.is_terminal());
        assert_eq!(
            phase.transition(Phase::Disputed),
            Err(PhaseError { from: Phase::Verified, to: Phase::Disputed })
        );
        assert_eq!(phase, Phase::Verified);
    }

    #[test]
    fn active_to_active_is_not_a_transition() {
        assert!(!Phase::Active.can_transition_to(Phase::Active));
        assert!(!Phase::Finalized.can_transition_to(Phase::Active));
        assert!(Phase::Active.can_transition_to(Phase::Finalized));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = Window::new(10u32, 20).unwrap();
        assert!(!window.is_open(9));
        assert!(window.is_open(10));
        assert!(window.is_open(20));
        assert!(!window.is_open(21));
        assert!(!window.has_elapsed(20));
        assert!(window.has_elapsed(21));
    }

    #[test]
    fn window_rejects_inverted_bounds() {
        assert_eq!(Window::new(5u32, 4), None);
        assert_eq!(Window::new(5u32, 5), Some(Window { start: 5, end: 5 }));
    }

    #[test]
    fn window_from_duration() {
        assert_eq!(Window::starting_at(7u32, 3), Some(Window { start: 7, end: 10 }));
        assert_eq!(Window::starting_at(u32::MAX, 1), None);
    }

    #[test]
    fn ids_start_at_one_and_never_wrap() {
        assert_eq!(next_id(0), Some(1));
        assert_eq!(next_id(41), Some(42));
        assert_eq!(next_id(EntityId::MAX), None);
    }
}
