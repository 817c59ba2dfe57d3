//! # Crowdli Token Pallet
//!
//! A permissioned fungible token (`CRT`) whose balances only move once the
//! compliance registries agree:
//!
//! - a KYC whitelist of accounts allowed to hold, send and receive tokens,
//! - per-account transfer blocks, each tagged with a block reason code,
//! - per-account, per-property allocations that lock part of a balance,
//! - four reason-code tables (transfer restriction, burn, mint, block).
//!
//! Transfers are checked by [`Pallet::detect_transfer_restriction`] and fail with
//! [`Error::TransferRestricted`] carrying the detected code. Every call validates
//! all of its preconditions before the first storage write.

#![cfg_attr(not(feature = "std"), no_std)]
// `pallet::getter` is deprecated upstream; storage getters are kept as the public query surface
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, traits::EnsureOrigin};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_std::{collections::btree_set::BTreeSet, prelude::*};

pub use codes::{
    BlockCodes, BurnCodes, CodeDomain, CodeMessage, CodeRegistry, CodeTable, MintCodes,
    RestrictionCodes, MAX_RESERVED_CODE,
};
pub use pallet::*;
pub use restriction::*;
pub use weights::WeightInfo;

mod allocation;
mod codes;
pub mod migrations;
mod restriction;
pub mod weights;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub(crate) const LOG_TARGET: &str = "runtime::crowdli-token";

pub const TOKEN_NAME: &[u8] = b"CROWDLITOKEN";
pub const TOKEN_SYMBOL: &[u8] = b"CRT";
pub const DECIMALS: u8 = 5;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
        type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

        /// Identifier of a property that holdings can be allocated against.
        type PropertyId: Parameter + Member + MaxEncodedLen + Copy;

        /// Maximum length of a reason-code message.
        #[pallet::constant]
        type MaxMessageLength: Get<u32>;

        /// Maximum number of accounts whitelisted in one call.
        #[pallet::constant]
        type MaxWhitelistBatch: Get<u32>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Total token supply
    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T> = StorageValue<_, u128, ValueQuery>;

    /// Account balances
    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Spending allowances, keyed by (owner, spender)
    #[pallet::storage]
    #[pallet::getter(fn allowance)]
    pub type Allowances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::AccountId,
        u128,
        ValueQuery,
    >;

    /// Accounts in the KYC role (can hold, send and receive tokens)
    #[pallet::storage]
    #[pallet::getter(fn is_whitelisted)]
    pub type Whitelist<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    /// Active transfer blocks as a set of block codes per account
    #[pallet::storage]
    pub type TransferBlocks<T: Config> =
        StorageDoubleMap<_, Blake2_128Concat, T::AccountId, Twox64Concat, u8, (), OptionQuery>;

    /// Number of accounts currently blocked with each block code
    #[pallet::storage]
    pub type BlockCodeHolders<T> = StorageMap<_, Twox64Concat, u8, u32, ValueQuery>;

    /// Tokens locked per (owner, property)
    #[pallet::storage]
    #[pallet::getter(fn property_lock)]
    pub type Allocations<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::PropertyId,
        u128,
        ValueQuery,
    >;

    /// Sum of all allocations of an owner
    #[pallet::storage]
    #[pallet::getter(fn allocated_tokens)]
    pub type TotalAllocated<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Reason messages of the four code tables
    #[pallet::storage]
    pub type Codes<T: Config> =
        StorageDoubleMap<_, Twox64Concat, CodeDomain, Twox64Concat, u8, CodeMessage<T>, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Tokens moved between accounts
        Transfer { from: T::AccountId, to: T::AccountId, value: u128 },
        /// Allowance of `spender` over `owner`'s tokens set to `value`
        Approval { owner: T::AccountId, spender: T::AccountId, value: u128 },
        /// New tokens minted for a mint code
        Mint { to: T::AccountId, value: u128, code: u8 },
        /// Tokens destroyed for a burn code
        Burn { from: T::AccountId, value: u128, code: u8 },
        /// Block code added to an account
        Block { address: T::AccountId, code: u8 },
        /// Block code lifted from an account
        Unblock { address: T::AccountId, code: u8 },
        /// Tokens locked against a property
        Allocate { owner: T::AccountId, property: T::PropertyId, amount: u128 },
        /// Tokens released from a property
        Unallocate { owner: T::AccountId, property: T::PropertyId, amount: u128 },
        /// Account added to the KYC role
        Whitelisted { account: T::AccountId },
        /// Account removed from the KYC role
        RemovedFromWhitelist { account: T::AccountId },
        /// Custom code added to a code table
        CodeSet { domain: CodeDomain, code: u8 },
        /// Custom code removed from a code table
        CodeRemoved { domain: CodeDomain, code: u8 },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Recipient of a mint is not in the KYC role
        NotWhitelisted,
        AlreadyWhitelisted,
        /// Account still holds tokens
        NonZeroBalance,
        /// Code lies in the reserved range `0..=100`
        CodeReserved,
        CodeAlreadyExists,
        CodeNotFound,
        /// Transfer rejected with the given restriction code
        TransferRestricted(u8),
        AllowanceExceeded,
        AllowanceUnderflow,
        InsufficientBalance,
        InsufficientUnallocated,
        InsufficientLocked,
        NoAllocationForProperty,
        /// Account has tokens allocated to properties
        HasAllocations,
        /// Block code is still held by at least one account
        BlockCodeInUse,
        Overflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn integrity_test() {
            assert!(
                T::MaxMessageLength::get() as usize >= codes::longest_reserved_message(),
                "MaxMessageLength must fit every reserved code message"
            );
            assert!(T::MaxWhitelistBatch::get() > 0, "MaxWhitelistBatch must be positive");
        }

        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::extra_constants]
    impl<T: Config> Pallet<T> {
        pub fn token_name() -> Vec<u8> {
            TOKEN_NAME.to_vec()
        }

        pub fn token_symbol() -> Vec<u8> {
            TOKEN_SYMBOL.to_vec()
        }

        pub fn decimals() -> u8 {
            DECIMALS
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::mint_to())]
        pub fn mint_to(
            origin: OriginFor<T>,
            to: T::AccountId,
            amount: u128,
            code: u8,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_mint(to, amount, code)
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::burn())]
        pub fn burn(
            origin: OriginFor<T>,
            from: T::AccountId,
            amount: u128,
            code: u8,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_burn(from, amount, code)
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::do_transfer(sender, to, amount)
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            from: T::AccountId,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::do_transfer_from(spender, from, to, amount)
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(origin: OriginFor<T>, spender: T::AccountId, amount: u128) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::set_allowance(owner, spender, amount);
            Ok(())
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn increase_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            delta: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            let value = Allowances::<T>::get(&owner, &spender)
                .checked_add(delta)
                .ok_or(Error::<T>::Overflow)?;
            Self::set_allowance(owner, spender, value);
            Ok(())
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn decrease_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            delta: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            let value = Allowances::<T>::get(&owner, &spender)
                .checked_sub(delta)
                .ok_or(Error::<T>::AllowanceUnderflow)?;
            Self::set_allowance(owner, spender, value);
            Ok(())
        }

        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::add_user_list_to_kyc_role(accounts.len() as u32))]
        pub fn add_user_list_to_kyc_role(
            origin: OriginFor<T>,
            accounts: BoundedVec<T::AccountId, T::MaxWhitelistBatch>,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_add_to_kyc_role(accounts.into_inner())
        }

        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::remove_user_from_kyc_role())]
        pub fn remove_user_from_kyc_role(
            origin: OriginFor<T>,
            account: T::AccountId,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            ensure!(Balances::<T>::get(&account) == 0, Error::<T>::NonZeroBalance);
            Whitelist::<T>::remove(&account);
            Self::deposit_event(Event::RemovedFromWhitelist { account });
            Ok(())
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::add_transfer_block())]
        pub fn add_transfer_block(
            origin: OriginFor<T>,
            account: T::AccountId,
            code: u8,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_add_transfer_block(account, code)
        }

        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::remove_transfer_block())]
        pub fn remove_transfer_block(
            origin: OriginFor<T>,
            account: T::AccountId,
            code: u8,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_remove_transfer_block(account, code)
        }

        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::allocate_amount_from_address_for_property())]
        pub fn allocate_amount_from_address_for_property(
            origin: OriginFor<T>,
            owner: T::AccountId,
            property: T::PropertyId,
            amount: u128,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_allocate(owner, property, amount)
        }

        #[pallet::call_index(12)]
        #[pallet::weight(T::WeightInfo::unallocate_property_from_address())]
        pub fn unallocate_property_from_address(
            origin: OriginFor<T>,
            owner: T::AccountId,
            property: T::PropertyId,
            amount: u128,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_unallocate(owner, property, amount)
        }

        #[pallet::call_index(13)]
        #[pallet::weight(T::WeightInfo::set_code())]
        pub fn set_restriction_code(
            origin: OriginFor<T>,
            code: u8,
            message: CodeMessage<T>,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            CodeRegistry::<T, RestrictionCodes>::set_code(code, message)
        }

        #[pallet::call_index(14)]
        #[pallet::weight(T::WeightInfo::remove_code())]
        pub fn remove_restriction_code(origin: OriginFor<T>, code: u8) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            CodeRegistry::<T, RestrictionCodes>::remove_code(code)
        }

        #[pallet::call_index(15)]
        #[pallet::weight(T::WeightInfo::set_code())]
        pub fn set_burn_code(
            origin: OriginFor<T>,
            code: u8,
            message: CodeMessage<T>,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            CodeRegistry::<T, BurnCodes>::set_code(code, message)
        }

        #[pallet::call_index(16)]
        #[pallet::weight(T::WeightInfo::remove_code())]
        pub fn remove_burn_code(origin: OriginFor<T>, code: u8) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            CodeRegistry::<T, BurnCodes>::remove_code(code)
        }

        #[pallet::call_index(17)]
        #[pallet::weight(T::WeightInfo::set_code())]
        pub fn set_mint_code(
            origin: OriginFor<T>,
            code: u8,
            message: CodeMessage<T>,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            CodeRegistry::<T, MintCodes>::set_code(code, message)
        }

        #[pallet::call_index(18)]
        #[pallet::weight(T::WeightInfo::remove_code())]
        pub fn remove_mint_code(origin: OriginFor<T>, code: u8) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            CodeRegistry::<T, MintCodes>::remove_code(code)
        }

        #[pallet::call_index(19)]
        #[pallet::weight(T::WeightInfo::set_code())]
        pub fn set_block_code(
            origin: OriginFor<T>,
            code: u8,
            message: CodeMessage<T>,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            CodeRegistry::<T, BlockCodes>::set_code(code, message)
        }

        #[pallet::call_index(20)]
        #[pallet::weight(T::WeightInfo::remove_code())]
        pub fn remove_block_code(origin: OriginFor<T>, code: u8) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            CodeRegistry::<T, BlockCodes>::ensure_removable(code)?;
            ensure!(BlockCodeHolders::<T>::get(code) == 0, Error::<T>::BlockCodeInUse);
            CodeRegistry::<T, BlockCodes>::remove_code(code)
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Initial admin account (will be whitelisted by default)
        pub admin: Option<T::AccountId>,
        /// Accounts to whitelist at genesis
        pub whitelisted_accounts: Vec<T::AccountId>,
        /// Initial token mints (account, amount); holders must be whitelisted
        pub initial_balances: Vec<(T::AccountId, u128)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            codes::seed_reserved_tables::<T>();

            if let Some(ref admin) = self.admin {
                Whitelist::<T>::insert(admin, true);
            }

            for account in &self.whitelisted_accounts {
                Whitelist::<T>::insert(account, true);
            }

            let mut total: u128 = 0;
            for (account, amount) in &self.initial_balances {
                assert!(Whitelist::<T>::get(account), "Initial balance holder must be whitelisted");
                Balances::<T>::mutate(account, |balance| *balance = balance.saturating_add(*amount));
                total = total.checked_add(*amount).expect("Initial balances overflow total supply");
            }
            TotalSupply::<T>::put(total);
        }
    }
}

impl<T: Config> Pallet<T> {
    pub(crate) fn do_mint(to: T::AccountId, amount: u128, code: u8) -> DispatchResult {
        ensure!(Whitelist::<T>::get(&to), Error::<T>::NotWhitelisted);
        CodeRegistry::<T, MintCodes>::ensure_exists(code)?;
        let supply = TotalSupply::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;

        TotalSupply::<T>::put(supply);
        // A balance never exceeds the total supply, which was just checked.
        Balances::<T>::mutate(&to, |balance| *balance = balance.saturating_add(amount));
        Self::deposit_event(Event::Mint { to, value: amount, code });
        Ok(())
    }

    pub(crate) fn do_burn(from: T::AccountId, amount: u128, code: u8) -> DispatchResult {
        ensure!(TotalAllocated::<T>::get(&from) == 0, Error::<T>::HasAllocations);
        let balance = Balances::<T>::get(&from);
        ensure!(balance >= amount, Error::<T>::InsufficientBalance);
        CodeRegistry::<T, BurnCodes>::ensure_exists(code)?;

        let remaining = balance - amount;
        if remaining == 0 {
            Balances::<T>::remove(&from);
        } else {
            Balances::<T>::insert(&from, remaining);
        }
        TotalSupply::<T>::mutate(|supply| *supply = supply.saturating_sub(amount));
        Self::deposit_event(Event::Burn { from, value: amount, code });
        Ok(())
    }

    pub(crate) fn do_transfer(from: T::AccountId, to: T::AccountId, amount: u128) -> DispatchResult {
        Self::ensure_unrestricted(&from, &to, amount)?;

        Self::move_balance(&from, &to, amount);
        Self::deposit_event(Event::Transfer { from, to, value: amount });
        Ok(())
    }

    pub(crate) fn do_transfer_from(
        spender: T::AccountId,
        from: T::AccountId,
        to: T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        Self::ensure_unrestricted(&from, &to, amount)?;
        let remaining = Allowances::<T>::get(&from, &spender)
            .checked_sub(amount)
            .ok_or(Error::<T>::AllowanceExceeded)?;

        Self::move_balance(&from, &to, amount);
        Self::deposit_event(Event::Transfer { from: from.clone(), to, value: amount });
        Self::set_allowance(from, spender, remaining);
        Ok(())
    }

    fn ensure_unrestricted(from: &T::AccountId, to: &T::AccountId, amount: u128) -> DispatchResult {
        let code = Self::detect_transfer_restriction(from, to, amount);
        if code != NO_RESTRICTIONS {
            log::debug!(
                target: LOG_TARGET,
                "transfer of {} rejected with restriction code {}",
                amount,
                code
            );
            return Err(Error::<T>::TransferRestricted(code).into());
        }
        Ok(())
    }

    /// Only called after `detect_transfer_restriction` approved the move, so the
    /// sender holds `amount` and the receiver stays within the total supply.
    fn move_balance(from: &T::AccountId, to: &T::AccountId, amount: u128) {
        Balances::<T>::mutate(from, |balance| *balance = balance.saturating_sub(amount));
        Balances::<T>::mutate(to, |balance| *balance = balance.saturating_add(amount));
    }

    fn set_allowance(owner: T::AccountId, spender: T::AccountId, value: u128) {
        if value == 0 {
            Allowances::<T>::remove(&owner, &spender);
        } else {
            Allowances::<T>::insert(&owner, &spender, value);
        }
        Self::deposit_event(Event::Approval { owner, spender, value });
    }

    pub(crate) fn do_add_to_kyc_role(accounts: Vec<T::AccountId>) -> DispatchResult {
        let mut seen = BTreeSet::new();
        for account in &accounts {
            ensure!(
                !Whitelist::<T>::get(account) && seen.insert(account),
                Error::<T>::AlreadyWhitelisted
            );
        }

        for account in accounts {
            Whitelist::<T>::insert(&account, true);
            Self::deposit_event(Event::Whitelisted { account });
        }
        Ok(())
    }

    pub(crate) fn do_add_transfer_block(account: T::AccountId, code: u8) -> DispatchResult {
        CodeRegistry::<T, BlockCodes>::ensure_exists(code)?;

        if !TransferBlocks::<T>::contains_key(&account, code) {
            TransferBlocks::<T>::insert(&account, code, ());
            BlockCodeHolders::<T>::mutate(code, |holders| *holders = holders.saturating_add(1));
        }
        Self::deposit_event(Event::Block { address: account, code });
        Ok(())
    }

    pub(crate) fn do_remove_transfer_block(account: T::AccountId, code: u8) -> DispatchResult {
        ensure!(TransferBlocks::<T>::contains_key(&account, code), Error::<T>::CodeNotFound);

        TransferBlocks::<T>::remove(&account, code);
        BlockCodeHolders::<T>::mutate_exists(code, |holders| {
            let left = holders.unwrap_or_default().saturating_sub(1);
            *holders = (left > 0).then_some(left);
        });
        Self::deposit_event(Event::Unblock { address: account, code });
        Ok(())
    }

    /// Block codes currently held by `account`, in ascending order.
    pub fn block_codes(account: &T::AccountId) -> Vec<u8> {
        let mut codes: Vec<u8> = TransferBlocks::<T>::iter_key_prefix(account).collect();
        codes.sort_unstable();
        codes
    }

    /// Checks the ledger invariants over the whole of storage.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), sp_runtime::DispatchError> {
        use sp_std::collections::btree_map::BTreeMap;

        let balances =
            Balances::<T>::iter_values().try_fold(0u128, |sum, balance| sum.checked_add(balance));
        ensure!(balances == Some(TotalSupply::<T>::get()), "TotalSupply differs from the sum of balances");

        for (owner, allocated) in TotalAllocated::<T>::iter() {
            let locked = Allocations::<T>::iter_prefix_values(&owner)
                .try_fold(0u128, |sum, amount| sum.checked_add(amount));
            ensure!(locked == Some(allocated), "TotalAllocated differs from the sum of allocations");
            ensure!(allocated <= Balances::<T>::get(&owner), "Allocations exceed the balance");
        }
        for (owner, _, locked) in Allocations::<T>::iter() {
            ensure!(locked > 0, "Empty allocation left in storage");
            ensure!(TotalAllocated::<T>::contains_key(&owner), "Allocation without a total");
        }

        let mut holders: BTreeMap<u8, u32> = BTreeMap::new();
        for (_, code, ()) in TransferBlocks::<T>::iter() {
            ensure!(
                CodeRegistry::<T, BlockCodes>::contains(code),
                "Transfer block uses an unknown block code"
            );
            *holders.entry(code).or_default() += 1;
        }
        for (code, count) in BlockCodeHolders::<T>::iter() {
            ensure!(holders.remove(&code) == Some(count), "Block code holder count is stale");
        }
        ensure!(holders.is_empty(), "Block code holder count is missing");

        ensure!(codes::reserved_tables_intact::<T>(), "Reserved code tables were modified");
        Ok(())
    }
}
