//! SportWarren shared primitive types.
//!
//! Every crate in the workspace imports from this crate.
//! No pallet-specific logic lives here, only type aliases,
//! constants, and the cross-cutting building blocks every
//! application is assembled from:
//!
//! - [`access`]: sender guards (authority, creator, reputation floor)
//! - [`lifecycle`]: entity phases, time windows and id assignment
//! - [`consensus`]: weighted-threshold policy objects
//! - [`credit`]: the credit ledger interface and fee arithmetic
//!
//! Pallets never depend on each other's types directly;
//! they depend on primitives.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod access;
pub mod consensus;
pub mod credit;
pub mod lifecycle;

pub use access::{Denial, Guard};
pub use consensus::{Comparison, ConsensusPolicy, Contribution, Tally, WeightRule};
pub use credit::{AssetDetails, AssetSpec, CreditLedger, FeeSplit};
pub use lifecycle::{next_id, Phase, PhaseError, Window};

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
pub use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentifyAccount, Verify},
    MultiSignature,
};

// ============================================================
// Core chain types
// ============================================================

/// The signature type. MultiSignature supports Ed25519, Sr25519, ECDSA.
pub type Signature = MultiSignature;

/// AccountId derived from the signature verification key (32-byte hash).
pub type AccountId = <<Signature as Verify>::Signer as IdentifyAccount>::AccountId;

/// Credit balance type.
pub type Balance = u128;

/// Block number type. One block is one ledger round.
pub type BlockNumber = u32;

/// Nonce (transaction index) per account.
pub type Nonce = u32;

/// The hashing algorithm used throughout the chain.
pub type Hashing = BlakeTwo256;

/// Block header type.
pub type Header = sp_runtime::generic::Header<BlockNumber, Hashing>;

/// Hash type used for block hashes, storage keys, etc.
pub type Hash = H256;

/// Identifier of a challenge, match or proposal. The first id of each kind is 1.
pub type EntityId = u64;

/// Identifier of a credit asset.
pub type AssetId = u32;

/// Reputation and skill points. Never negative.
pub type ReputationScore = u64;

/// Accumulated consensus weight (verification, dispute, vote).
pub type ConsensusWeight = u128;

// ============================================================
// Bounded byte strings
// ============================================================

pub type BoundedTitle = sp_runtime::BoundedVec<u8, sp_core::ConstU32<128>>;
pub type BoundedDescription = sp_runtime::BoundedVec<u8, sp_core::ConstU32<1024>>;
/// Reference to off-chain evidence (content hash, URL).
pub type BoundedEvidence = sp_runtime::BoundedVec<u8, sp_core::ConstU32<256>>;
pub type BoundedCategory = sp_runtime::BoundedVec<u8, sp_core::ConstU32<64>>;
pub type BoundedTeam = sp_runtime::BoundedVec<u8, sp_core::ConstU32<64>>;
pub type BoundedMetadata = sp_runtime::BoundedVec<u8, sp_core::ConstU32<512>>;
pub type BoundedAssetName = sp_runtime::BoundedVec<u8, sp_core::ConstU32<32>>;
pub type BoundedAssetUnit = sp_runtime::BoundedVec<u8, sp_core::ConstU32<8>>;

// ============================================================
// Global challenges constants
// ============================================================

/// Platform fee taken from every prize distribution, in percent.
pub const PLATFORM_FEE_PERCENT: u8 = 5;

/// Reputation needed to create a challenge without being the authority.
pub const SPONSOR_REPUTATION_FLOOR: ReputationScore = 5_000;

/// Reputation needed to verify another participant's progress.
pub const PROGRESS_VERIFIER_FLOOR: ReputationScore = 1_000;

/// Highest reputation a participant may declare on registration. Anything
/// above it is granted by the authority.
pub const MAX_DECLARED_REPUTATION: ReputationScore = 2_000;

// ============================================================
// Match verification constants
// ============================================================

/// Oracle reputation granted on registration.
pub const MATCH_START_REPUTATION: ReputationScore = 100;

/// Default number of full-weight verifications needed to confirm a match.
pub const MIN_VERIFICATIONS: u32 = 3;

/// Default reputation needed to submit, verify or dispute a match.
pub const MATCH_REPUTATION_THRESHOLD: ReputationScore = 50;

/// One "verification" is worth this much weight.
pub const VERIFICATION_WEIGHT_SCALE: ConsensusWeight = 100;

/// Accumulated dispute weight that flips a match to disputed.
pub const DISPUTE_WEIGHT_THRESHOLD: ConsensusWeight = 200;

// ============================================================
// Reputation system constants
// ============================================================

/// Reputation granted to a player on registration.
pub const PLAYER_START_REPUTATION: ReputationScore = 1_000;

/// REP and SKILL are each issued with this fixed supply in base units.
pub const REPUTATION_TOKEN_SUPPLY: Balance = 1_000_000_000;

/// Decimal scale of REP and SKILL.
pub const REPUTATION_TOKEN_DECIMALS: u8 = 6;

/// REP base units allocated on registration (1000 points at 1000 units each).
pub const REP_REGISTRATION_ALLOCATION: Balance = 1_000_000;

/// Credit base units issued per reputation or skill point.
pub const TOKEN_UNITS_PER_POINT: Balance = 1_000;

/// Skill points earned per rating point.
pub const SKILL_POINTS_PER_RATING: ReputationScore = 10;

/// Highest skill or endorsement rating.
pub const MAX_RATING: u8 = 100;

/// Reputation an endorser needs before their endorsement counts.
pub const ENDORSER_REPUTATION_FLOOR: ReputationScore = 500;

/// Endorser weight is their reputation divided by this.
pub const ENDORSEMENT_WEIGHT_DIVISOR: ReputationScore = 100;

/// Reputation bonus per unit of endorser weight.
pub const ENDORSEMENT_BONUS_MULTIPLIER: ReputationScore = 5;

/// Points awarded per achievement rarity level (1 = common, 4 = legendary).
pub const ACHIEVEMENT_POINTS_PER_RARITY: ReputationScore = 100;
pub const MAX_ACHIEVEMENT_RARITY: u8 = 4;

/// Professional score and reputation bonus per scouting interest level.
pub const SCOUT_BONUS_PER_INTEREST: ReputationScore = 500;
pub const MAX_SCOUT_INTEREST: u8 = 3;

/// Default number of verifications a skill needs to be considered verified.
pub const SKILL_VERIFICATION_THRESHOLD: u32 = 3;

// ============================================================
// Squad DAO constants
// ============================================================

/// SDAO supply. Whole tokens, no decimals.
pub const SDAO_SUPPLY: Balance = 1_000_000;
pub const SDAO_DECIMALS: u8 = 0;

/// SDAO allocated to every member on registration.
pub const SDAO_MEMBER_ALLOCATION: Balance = 100;

// ============================================================
// Shared enums
// ============================================================

/// Whether an application still accepts invocations.
#[derive(
    Clone, Copy, PartialEq, Eq,
    Encode, Decode, MaxEncodedLen, TypeInfo, Debug,
)]
pub enum AppStatus {
    Live,
    /// Closed by its authority. Terminal; state is retained.
    Closed,
}

impl Default for AppStatus {
    fn default() -> Self {
        Self::Live
    }
}

/// Application-level record written by the initialization call.
#[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
pub struct AppInfo<AccountId, BlockNumber> {
    /// The caller of the initialization call.
    pub authority: AccountId,
    pub status: AppStatus,
    pub initialized_at: BlockNumber,
}

/// Role a match verifier claims. Determines the bonus added to their reputation.
#[derive(
    Clone, Copy, PartialEq, Eq,
    Encode, Decode, MaxEncodedLen, TypeInfo, Debug,
)]
pub enum VerifierRole {
    Player,
    Referee,
    Coach,
    Official,
    Spectator,
}

impl VerifierRole {
    pub const fn bonus(self) -> ReputationScore {
        match self {
            Self::Player => 10,
            Self::Referee => 50,
            Self::Coach => 20,
            Self::Official => 30,
            Self::Spectator => 5,
        }
    }
}

/// Coarse classification of every rejection an application can produce.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorClass {
    /// A sender guard failed.
    Authorization,
    /// The referenced entity, registration or asset was never created.
    NotFound,
    /// Outside the valid phase or time window.
    State,
    /// An idempotency record is already set.
    DuplicateAction,
    /// Out of range, insufficient balance, or arithmetic overflow.
    Bounds,
}
