use crate as pallet_match_verification;
use frame_support::{
    derive_impl,
    traits::{ConstU32, ConstU64},
};
use sp_runtime::BuildStorage;
use sportwarren_primitives::{MATCH_REPUTATION_THRESHOLD, MATCH_START_REPUTATION, MIN_VERIFICATIONS};

type Block = frame_system::mocking::MockBlock<Test>;

frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        MatchVerification: pallet_match_verification,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
}

impl pallet_match_verification::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type StartingReputation = ConstU64<MATCH_START_REPUTATION>;
    type DefaultMinVerifications = ConstU32<MIN_VERIFICATIONS>;
    type DefaultReputationThreshold = ConstU64<MATCH_REPUTATION_THRESHOLD>;
    type WeightInfo = pallet_match_verification::DefaultWeightInfo;
}

pub const AUTHORITY: u64 = 1;
pub const SUBMITTER: u64 = 2;
pub const REF_A: u64 = 3;
pub const REF_B: u64 = 4;
pub const FAN: u64 = 5;
pub const OUTSIDER: u64 = 9;

/// Initialized application with every oracle except `OUTSIDER` registered.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let storage = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
    let mut ext = sp_io::TestExternalities::new(storage);
    ext.execute_with(|| {
        System::set_block_number(1);
        MatchVerification::initialize(RuntimeOrigin::signed(AUTHORITY)).unwrap();
        for who in [SUBMITTER, REF_A, REF_B, FAN] {
            MatchVerification::register(RuntimeOrigin::signed(who)).unwrap();
        }
    });
    ext
}
