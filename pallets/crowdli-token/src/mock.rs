use crate as pallet_crowdli_token;
use frame_support::{derive_impl, parameter_types};
use sp_runtime::BuildStorage;

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        CrowdliToken: pallet_crowdli_token,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
}

pub const ADMIN: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const CHRIS: u64 = 4;
pub const BROKER: u64 = 5;
/// Never whitelisted at genesis.
pub const OUTSIDER: u64 = 9;

pub const BOB_BALANCE: u128 = 100_000;
pub const CHRIS_BALANCE: u128 = 50_000;
pub const INITIAL_SUPPLY: u128 = BOB_BALANCE + CHRIS_BALANCE;

pub const PROPERTY_A: u64 = 1001;
pub const PROPERTY_B: u64 = 1002;

parameter_types! {
    pub const AdminAccount: u64 = ADMIN;
    pub const MaxMessageLength: u32 = 64;
    pub const MaxWhitelistBatch: u32 = 8;
}

pub struct EnsureAdmin;
impl frame_support::traits::EnsureOrigin<RuntimeOrigin> for EnsureAdmin {
    type Success = u64;

    fn try_origin(o: RuntimeOrigin) -> Result<Self::Success, RuntimeOrigin> {
        match o.clone().into() {
            Ok(frame_system::RawOrigin::Signed(account)) if account == AdminAccount::get() => {
                Ok(account)
            }
            _ => Err(o),
        }
    }

    #[cfg(feature = "runtime-benchmarks")]
    fn try_successful_origin() -> Result<RuntimeOrigin, ()> {
        Ok(RuntimeOrigin::signed(AdminAccount::get()))
    }
}

impl pallet_crowdli_token::Config for Test {
    type AdminOrigin = EnsureAdmin;
    type PropertyId = u64;
    type MaxMessageLength = MaxMessageLength;
    type MaxWhitelistBatch = MaxWhitelistBatch;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_crowdli_token::GenesisConfig::<Test> {
        admin: Some(AdminAccount::get()),
        whitelisted_accounts: vec![ALICE, BOB, CHRIS],
        initial_balances: vec![(BOB, BOB_BALANCE), (CHRIS, CHRIS_BALANCE)],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}

/// Runs `test` on fresh genesis state and checks the ledger invariants afterwards.
pub fn build_and_execute(test: impl FnOnce()) {
    new_test_ext().execute_with(|| {
        test();
        CrowdliToken::do_try_state().expect("ledger invariants hold after the test");
    });
}

/// Bounded reason message for code-table calls.
pub fn message(text: &str) -> crate::CodeMessage<Test> {
    text.as_bytes().to_vec().try_into().expect("message fits MaxMessageLength")
}
