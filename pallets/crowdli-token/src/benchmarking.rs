//! Benchmarking setup for pallet-crowdli-token

use super::*;

#[allow(unused)]
use crate::Pallet as CrowdliToken;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;
use sp_runtime::traits::TrailingZeroInput;

const FUNDS: u128 = 10_000_000;

fn funded<T: Config>(name: &'static str) -> T::AccountId {
    let who: T::AccountId = account(name, 0, 0);
    Whitelist::<T>::insert(&who, true);
    Balances::<T>::insert(&who, FUNDS);
    TotalSupply::<T>::mutate(|supply| *supply += FUNDS);
    who
}

fn custom_message<T: Config>() -> CodeMessage<T> {
    BoundedVec::truncate_from(b"CUSTOM".to_vec())
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn mint_to() {
        let recipient: T::AccountId = account("recipient", 0, 0);
        Whitelist::<T>::insert(&recipient, true);
        CodeRegistry::<T, MintCodes>::seed();
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, recipient.clone(), FUNDS, 0);

        assert_eq!(Balances::<T>::get(&recipient), FUNDS);
    }

    #[benchmark]
    fn burn() {
        let holder = funded::<T>("holder");
        CodeRegistry::<T, BurnCodes>::seed();
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, holder.clone(), FUNDS, 0);

        assert_eq!(Balances::<T>::get(&holder), 0);
    }

    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = whitelisted_caller();
        Whitelist::<T>::insert(&caller, true);
        Balances::<T>::insert(&caller, FUNDS);
        TotalSupply::<T>::mutate(|supply| *supply += FUNDS);
        let recipient = funded::<T>("recipient");

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), recipient.clone(), FUNDS);

        assert_eq!(Balances::<T>::get(&recipient), 2 * FUNDS);
    }

    #[benchmark]
    fn transfer_from() {
        let spender: T::AccountId = whitelisted_caller();
        let owner = funded::<T>("owner");
        let recipient = funded::<T>("recipient");
        Allowances::<T>::insert(&owner, &spender, FUNDS);

        #[extrinsic_call]
        _(RawOrigin::Signed(spender.clone()), owner.clone(), recipient.clone(), FUNDS);

        assert_eq!(Allowances::<T>::get(&owner, &spender), 0);
    }

    #[benchmark]
    fn approve() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), FUNDS);

        assert_eq!(Allowances::<T>::get(&caller, &spender), FUNDS);
    }

    #[benchmark]
    fn add_user_list_to_kyc_role(n: Linear<1, { T::MaxWhitelistBatch::get() }>) {
        let accounts: Vec<T::AccountId> = (0..n).map(|i| account("kyc", i, 0)).collect();
        let batch: BoundedVec<T::AccountId, T::MaxWhitelistBatch> =
            accounts.clone().try_into().expect("batch within bound");
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, batch);

        assert!(accounts.iter().all(|who| Whitelist::<T>::get(who)));
    }

    #[benchmark]
    fn remove_user_from_kyc_role() {
        let who: T::AccountId = account("leaver", 0, 0);
        Whitelist::<T>::insert(&who, true);
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, who.clone());

        assert!(!Whitelist::<T>::get(&who));
    }

    #[benchmark]
    fn add_transfer_block() {
        let who: T::AccountId = account("blocked", 0, 0);
        CodeRegistry::<T, BlockCodes>::seed();
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, who.clone(), 0);

        assert!(Pallet::<T>::is_blocked(&who));
    }

    #[benchmark]
    fn remove_transfer_block() {
        let who: T::AccountId = account("blocked", 0, 0);
        TransferBlocks::<T>::insert(&who, 0, ());
        BlockCodeHolders::<T>::insert(0, 1);
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, who.clone(), 0);

        assert!(!Pallet::<T>::is_blocked(&who));
    }

    #[benchmark]
    fn allocate_amount_from_address_for_property() {
        let owner = funded::<T>("owner");
        let property: T::PropertyId = Decode::decode(&mut TrailingZeroInput::zeroes())
            .expect("property id decodes from zeroes");
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, owner.clone(), property, FUNDS);

        assert_eq!(TotalAllocated::<T>::get(&owner), FUNDS);
    }

    #[benchmark]
    fn unallocate_property_from_address() {
        let owner = funded::<T>("owner");
        let property: T::PropertyId = Decode::decode(&mut TrailingZeroInput::zeroes())
            .expect("property id decodes from zeroes");
        Allocations::<T>::insert(&owner, property, FUNDS);
        TotalAllocated::<T>::insert(&owner, FUNDS);
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, owner.clone(), property, FUNDS);

        assert_eq!(TotalAllocated::<T>::get(&owner), 0);
    }

    #[benchmark]
    fn set_code() {
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        set_block_code(origin as T::RuntimeOrigin, 200, custom_message::<T>());

        assert!(CodeRegistry::<T, BlockCodes>::contains(200));
    }

    #[benchmark]
    fn remove_code() {
        Codes::<T>::insert(CodeDomain::Block, 200, custom_message::<T>());
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        remove_block_code(origin as T::RuntimeOrigin, 200);

        assert!(!CodeRegistry::<T, BlockCodes>::contains(200));
    }

    impl_benchmark_test_suite!(CrowdliToken, crate::mock::new_test_ext(), crate::mock::Test);
}
