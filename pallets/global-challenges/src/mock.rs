use crate as pallet_global_challenges;
use frame_support::{
    derive_impl,
    traits::{ConstU64, ConstU8},
};
use sp_runtime::BuildStorage;
use sportwarren_primitives::{
    MAX_DECLARED_REPUTATION, PLATFORM_FEE_PERCENT, PROGRESS_VERIFIER_FLOOR, SPONSOR_REPUTATION_FLOOR,
};

type Block = frame_system::mocking::MockBlock<Test>;

frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Challenges: pallet_global_challenges,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
}

impl pallet_global_challenges::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type DefaultPlatformFee = ConstU8<PLATFORM_FEE_PERCENT>;
    type SponsorReputationFloor = ConstU64<SPONSOR_REPUTATION_FLOOR>;
    type VerifierReputationFloor = ConstU64<PROGRESS_VERIFIER_FLOOR>;
    type MaxDeclaredReputation = ConstU64<MAX_DECLARED_REPUTATION>;
    type WeightInfo = pallet_global_challenges::DefaultWeightInfo;
}

pub const AUTHORITY: u64 = 1;
pub const SPONSOR: u64 = 2;
pub const ALICE: u64 = 3;
pub const BOB: u64 = 4;
pub const CAROL: u64 = 5;
pub const NEWCOMER: u64 = 6;

/// Initialized application with a sponsor raised by the authority, three
/// veterans and a newcomer registered.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let storage = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
    let mut ext = sp_io::TestExternalities::new(storage);
    ext.execute_with(|| {
        System::set_block_number(1);
        Challenges::initialize(RuntimeOrigin::signed(AUTHORITY)).unwrap();
        Challenges::register(RuntimeOrigin::signed(SPONSOR), 2_000).unwrap();
        Challenges::update_reputation(RuntimeOrigin::signed(AUTHORITY), SPONSOR, 6_000).unwrap();
        for who in [ALICE, BOB, CAROL] {
            Challenges::register(RuntimeOrigin::signed(who), 2_000).unwrap();
        }
        Challenges::register(RuntimeOrigin::signed(NEWCOMER), 100).unwrap();
    });
    ext
}

/// Same as [`new_test_ext`] but without initialization.
pub fn uninitialized_ext() -> sp_io::TestExternalities {
    let storage = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
    let mut ext = sp_io::TestExternalities::new(storage);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
