//! # SportWarren Runtime
//!
//! Wires the credit ledger and the four SportWarren applications together
//! with their configuration and constants.
//!
//! ## Applications
//! - **Challenges**: prize-bearing challenges with platform fee settlement
//! - **MatchVerification**: reputation-weighted match result consensus
//! - **ReputationSystem**: skill and reputation economy backed by REP / SKILL
//! - **SquadDao**: SDAO-weighted squad governance
//!
//! Applications reach the shared `Credits` ledger only through
//! [`CreditLedger`]; it has no extrinsics of its own.
//!
//! ## Invocation
//! Principals submit SCALE-encoded [`RuntimeCall`]s through
//! [`dispatch::invoke`]. Only application calls pass the base call filter,
//! so anything else is rejected before it can touch state.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dispatch;

use frame_support::{
    construct_runtime, derive_impl, parameter_types,
    traits::{ConstU128, ConstU32, ConstU64, ConstU8, Contains},
    PalletId,
};
use sp_runtime::{generic, traits::AccountIdLookup, MultiAddress};
use sportwarren_primitives::*;

pub use sportwarren_primitives::{AccountId, Balance, BlockNumber};

/// Address format of the outer extrinsic.
pub type Address = MultiAddress<AccountId, ()>;

/// Unchecked extrinsic type. Invocations arrive pre-authenticated, so there
/// are no signed extensions.
pub type UncheckedExtrinsic = generic::UncheckedExtrinsic<Address, RuntimeCall, Signature, ()>;

/// Block type as expected by the runtime.
pub type Block = generic::Block<Header, UncheckedExtrinsic>;

// ============================================================
// frame_system
// ============================================================

/// Base call filter: application calls only.
pub struct ApplicationCalls;
impl Contains<RuntimeCall> for ApplicationCalls {
    fn contains(call: &RuntimeCall) -> bool {
        matches!(
            call,
            RuntimeCall::Challenges(_)
                | RuntimeCall::MatchVerification(_)
                | RuntimeCall::ReputationSystem(_)
                | RuntimeCall::SquadDao(_)
        )
    }
}

parameter_types! {
    pub const BlockHashCount: BlockNumber = 2400;
}

#[derive_impl(frame_system::config_preludes::SolochainDefaultConfig)]
impl frame_system::Config for Runtime {
    type BaseCallFilter = ApplicationCalls;
    type Block = Block;
    type AccountId = AccountId;
    type Lookup = AccountIdLookup<AccountId, ()>;
    type Nonce = Nonce;
    type Hash = Hash;
    type BlockHashCount = BlockHashCount;
    type MaxConsumers = ConstU32<16>;
}

// ============================================================
// Credits
// ============================================================

impl pallet_credits::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
}

// ============================================================
// Applications
// ============================================================

impl pallet_global_challenges::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type DefaultPlatformFee = ConstU8<PLATFORM_FEE_PERCENT>;
    type SponsorReputationFloor = ConstU64<SPONSOR_REPUTATION_FLOOR>;
    type VerifierReputationFloor = ConstU64<PROGRESS_VERIFIER_FLOOR>;
    type MaxDeclaredReputation = ConstU64<MAX_DECLARED_REPUTATION>;
    type WeightInfo = pallet_global_challenges::DefaultWeightInfo;
}

impl pallet_match_verification::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type StartingReputation = ConstU64<MATCH_START_REPUTATION>;
    type DefaultMinVerifications = ConstU32<MIN_VERIFICATIONS>;
    type DefaultReputationThreshold = ConstU64<MATCH_REPUTATION_THRESHOLD>;
    type WeightInfo = pallet_match_verification::DefaultWeightInfo;
}

parameter_types! {
    pub const ReputationPalletId: PalletId = PalletId(*b"sw/reptn");
    pub const SquadPalletId: PalletId = PalletId(*b"sw/squad");
}

impl pallet_reputation_system::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type Credits = Credits;
    type PalletId = ReputationPalletId;
    type StartingReputation = ConstU64<PLAYER_START_REPUTATION>;
    type DefaultVerificationThreshold = ConstU32<SKILL_VERIFICATION_THRESHOLD>;
    type WeightInfo = pallet_reputation_system::DefaultWeightInfo;
}

impl pallet_squad_dao::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type Credits = Credits;
    type PalletId = SquadPalletId;
    type TotalSupply = ConstU128<SDAO_SUPPLY>;
    type MemberAllocation = ConstU128<SDAO_MEMBER_ALLOCATION>;
    type WeightInfo = pallet_squad_dao::DefaultWeightInfo;
}

// ============================================================
// Construct Runtime
// ============================================================

construct_runtime!(
    pub struct Runtime {
        System: frame_system,

        // Shared ledger
        Credits: pallet_credits,

        // SportWarren applications
        Challenges: pallet_global_challenges,
        MatchVerification: pallet_match_verification,
        ReputationSystem: pallet_reputation_system,
        SquadDao: pallet_squad_dao,
    }
);
