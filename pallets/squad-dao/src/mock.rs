use crate as pallet_squad_dao;
use frame_support::{derive_impl, parameter_types, traits::ConstU128, PalletId};
use sp_runtime::BuildStorage;
use sportwarren_primitives::{SDAO_MEMBER_ALLOCATION, SDAO_SUPPLY};

type Block = frame_system::mocking::MockBlock<Test>;

frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Credits: pallet_credits,
        SquadDao: pallet_squad_dao,
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
    pub const SquadPalletId: PalletId = PalletId(*b"sw/squad");
}

impl pallet_squad_dao::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Credits = Credits;
    type PalletId = SquadPalletId;
    type TotalSupply = ConstU128<SDAO_SUPPLY>;
    type MemberAllocation = ConstU128<SDAO_MEMBER_ALLOCATION>;
    type WeightInfo = pallet_squad_dao::DefaultWeightInfo;
}

pub const CAPTAIN: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const CAROL: u64 = 4;
pub const OUTSIDER: u64 = 9;

pub const SDAO: u32 = 0;

/// Initialized DAO with ALICE, BOB and CAROL holding 100 SDAO each.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let storage = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
    let mut ext = sp_io::TestExternalities::new(storage);
    ext.execute_with(|| {
        System::set_block_number(1);
        SquadDao::initialize(RuntimeOrigin::signed(CAPTAIN)).unwrap();
        for who in [ALICE, BOB, CAROL] {
            SquadDao::register(RuntimeOrigin::signed(who)).unwrap();
        }
    });
    ext
}
