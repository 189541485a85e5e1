use crate as pallet_reputation_system;
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU32, ConstU64},
    PalletId,
};
use sp_runtime::BuildStorage;
use sportwarren_primitives::{PLAYER_START_REPUTATION, SKILL_VERIFICATION_THRESHOLD};

type Block = frame_system::mocking::MockBlock<Test>;

frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Credits: pallet_credits,
        ReputationSystem: pallet_reputation_system,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
}

impl pallet_credits::Config for Test {
    type RuntimeEvent = RuntimeEvent;
}

parameter_types! {
    pub const ReputationPalletId: PalletId = PalletId(*b"sw/reptn");
}

impl pallet_reputation_system::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Credits = Credits;
    type PalletId = ReputationPalletId;
    type StartingReputation = ConstU64<PLAYER_START_REPUTATION>;
    type DefaultVerificationThreshold = ConstU32<SKILL_VERIFICATION_THRESHOLD>;
    type WeightInfo = pallet_reputation_system::DefaultWeightInfo;
}

pub const AUTHORITY: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const CAROL: u64 = 4;
pub const OUTSIDER: u64 = 9;

/// REP and SKILL are the first two assets issued.
pub const REP: u32 = 0;
pub const SKILL: u32 = 1;

/// Initialized application with ALICE, BOB and CAROL registered.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let storage = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
    let mut ext = sp_io::TestExternalities::new(storage);
    ext.execute_with(|| {
        System::set_block_number(1);
        ReputationSystem::initialize(RuntimeOrigin::signed(AUTHORITY)).unwrap();
        for who in [ALICE, BOB, CAROL] {
            ReputationSystem::register(RuntimeOrigin::signed(who)).unwrap();
        }
    });
    ext
}
