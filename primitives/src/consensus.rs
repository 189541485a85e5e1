//! Weighted-threshold consensus policies.
//!
//! Each workflow that advances an entity by collecting contributions from
//! independent principals is described by one [`ConsensusPolicy`]: how a
//! single contribution is weighed, the threshold the running total is
//! compared against, and the comparison operator. Accumulation is checked
//! integer arithmetic; an overflowing contribution is rejected, never
//! saturated.

use crate::{
    Balance, ConsensusWeight, ReputationScore, DISPUTE_WEIGHT_THRESHOLD,
    VERIFICATION_WEIGHT_SCALE,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Comparison {
    /// `total >= threshold`
    AtLeast,
    /// `total > threshold`
    GreaterThan,
}

impl Comparison {
    pub fn holds(self, lhs: ConsensusWeight, rhs: ConsensusWeight) -> bool {
        match self {
            Comparison::AtLeast => lhs >= rhs,
            Comparison::GreaterThan => lhs > rhs,
        }
    }
}

/// How much a single contribution weighs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WeightRule {
    /// Contributor's reputation plus the bonus of the role they claim.
    ReputationPlusRole,
    /// Contributor's reputation alone.
    Reputation,
    /// Contributor's credit balance (stake-weighted).
    Stake,
    /// Every contribution counts as one.
    Unit,
}

/// What the contributor brings to a single action.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Contribution {
    pub reputation: ReputationScore,
    pub role_bonus: ReputationScore,
    pub stake: Balance,
}

impl Contribution {
    pub fn reputation(reputation: ReputationScore) -> Self {
        Self { reputation, ..Default::default() }
    }

    pub fn with_role(reputation: ReputationScore, role_bonus: ReputationScore) -> Self {
        Self { reputation, role_bonus, ..Default::default() }
    }

    pub fn stake(stake: Balance) -> Self {
        Self { stake, ..Default::default() }
    }
}

/// Result of folding one contribution into a running total.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tally {
    /// Weight this contribution added.
    pub weight: ConsensusWeight,
    /// Running total after the contribution.
    pub total: ConsensusWeight,
    /// Whether the new total satisfies the policy.
    pub decided: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ConsensusPolicy {
    pub rule: WeightRule,
    /// `None` for tallies that never gate a phase change.
    pub threshold: Option<ConsensusWeight>,
    pub comparison: Comparison,
}

impl ConsensusPolicy {
    /// Match confirmation: reputation plus role bonus, `>= min_verifications * 100`.
    pub fn match_verification(min_verifications: u32) -> Self {
        Self {
            rule: WeightRule::ReputationPlusRole,
            threshold: Some(
                ConsensusWeight::from(min_verifications).saturating_mul(VERIFICATION_WEIGHT_SCALE),
            ),
            comparison: Comparison::AtLeast,
        }
    }

    /// Match dispute: reputation, `>= 200`.
    pub fn match_dispute() -> Self {
        Self {
            rule: WeightRule::Reputation,
            threshold: Some(DISPUTE_WEIGHT_THRESHOLD),
            comparison: Comparison::AtLeast,
        }
    }

    /// Challenge progress approvals. Counted, never decisive.
    pub fn progress_approval() -> Self {
        Self { rule: WeightRule::Unit, threshold: None, comparison: Comparison::AtLeast }
    }

    /// Proposal votes. Weighed by stake; the outcome is decided by [`majority`].
    pub fn stake_vote() -> Self {
        Self { rule: WeightRule::Stake, threshold: None, comparison: Comparison::GreaterThan }
    }

    pub fn weigh(&self, contribution: &Contribution) -> Option<ConsensusWeight> {
        match self.rule {
            WeightRule::ReputationPlusRole => contribution
                .reputation
                .checked_add(contribution.role_bonus)
                .map(ConsensusWeight::from),
            WeightRule::Reputation => Some(ConsensusWeight::from(contribution.reputation)),
            WeightRule::Stake => Some(contribution.stake),
            WeightRule::Unit => Some(1),
        }
    }

    pub fn decides(&self, total: ConsensusWeight) -> bool {
        self.threshold
            .map(|threshold| self.comparison.holds(total, threshold))
            .unwrap_or(false)
    }

    /// Fold `contribution` into `total`. `None` on overflow.
    pub fn contribute(&self, total: ConsensusWeight, contribution: &Contribution) -> Option<Tally> {
        let weight = self.weigh(contribution)?;
        let total = total.checked_add(weight)?;
        Some(Tally { weight, total, decided: self.decides(total) })
    }
}

/// Strict majority of stake: ties are not a majority.
pub fn majority(aye: ConsensusWeight, nay: ConsensusWeight) -> bool {
    Comparison::GreaterThan.holds(aye, nay)
}
