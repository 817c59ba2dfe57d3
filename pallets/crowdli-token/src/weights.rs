//! Weights for pallet-crowdli-token.
//!
//! Hand-estimated from the storage accesses of each call until the pallet is
//! benchmarked on reference hardware with `benchmarking.rs`.

#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

/// Weight functions needed for pallet-crowdli-token.
pub trait WeightInfo {
    fn mint_to() -> Weight;
    fn burn() -> Weight;
    fn transfer() -> Weight;
    fn transfer_from() -> Weight;
    fn approve() -> Weight;
    fn add_user_list_to_kyc_role(n: u32) -> Weight;
    fn remove_user_from_kyc_role() -> Weight;
    fn add_transfer_block() -> Weight;
    fn remove_transfer_block() -> Weight;
    fn allocate_amount_from_address_for_property() -> Weight;
    fn unallocate_property_from_address() -> Weight;
    fn set_code() -> Weight;
    fn remove_code() -> Weight;
}

impl WeightInfo for () {
    /// Storage: Whitelist, Codes, TotalSupply, Balances
    fn mint_to() -> Weight {
        Weight::from_parts(20_000_000, 3_600).saturating_add(RocksDbWeight::get().reads_writes(4, 2))
    }
    /// Storage: TotalAllocated, Balances, Codes, TotalSupply
    fn burn() -> Weight {
        Weight::from_parts(20_000_000, 3_600).saturating_add(RocksDbWeight::get().reads_writes(4, 2))
    }
    /// Storage: Whitelist (2), TransferBlocks (2), Balances (2), TotalAllocated
    fn transfer() -> Weight {
        Weight::from_parts(30_000_000, 6_200).saturating_add(RocksDbWeight::get().reads_writes(7, 2))
    }
    /// As `transfer`, plus Allowances
    fn transfer_from() -> Weight {
        Weight::from_parts(35_000_000, 6_200).saturating_add(RocksDbWeight::get().reads_writes(8, 3))
    }
    /// Storage: Allowances
    fn approve() -> Weight {
        Weight::from_parts(12_000_000, 3_600).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    /// Storage: Whitelist (n)
    fn add_user_list_to_kyc_role(n: u32) -> Weight {
        Weight::from_parts(8_000_000, 0)
            .saturating_add(Weight::from_parts(6_000_000, 2_500).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads_writes(n.into(), n.into()))
    }
    /// Storage: Balances, Whitelist
    fn remove_user_from_kyc_role() -> Weight {
        Weight::from_parts(12_000_000, 3_600).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    /// Storage: Codes, TransferBlocks, BlockCodeHolders
    fn add_transfer_block() -> Weight {
        Weight::from_parts(15_000_000, 3_600).saturating_add(RocksDbWeight::get().reads_writes(3, 2))
    }
    /// Storage: TransferBlocks, BlockCodeHolders
    fn remove_transfer_block() -> Weight {
        Weight::from_parts(15_000_000, 3_600).saturating_add(RocksDbWeight::get().reads_writes(2, 2))
    }
    /// Storage: Balances, TotalAllocated, Allocations
    fn allocate_amount_from_address_for_property() -> Weight {
        Weight::from_parts(18_000_000, 3_600).saturating_add(RocksDbWeight::get().reads_writes(3, 2))
    }
    /// Storage: Allocations, TotalAllocated
    fn unallocate_property_from_address() -> Weight {
        Weight::from_parts(18_000_000, 3_600).saturating_add(RocksDbWeight::get().reads_writes(2, 2))
    }
    /// Storage: Codes
    fn set_code() -> Weight {
        Weight::from_parts(12_000_000, 3_600).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    /// Storage: Codes, BlockCodeHolders
    fn remove_code() -> Weight {
        Weight::from_parts(12_000_000, 3_600).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
}
