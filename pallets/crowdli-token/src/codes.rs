//! Reason-code tables.
//!
//! The pallet keeps four tables that translate a small integer code into a
//! human-readable reason: transfer restrictions, burns, mints and transfer
//! blocks. They share one storage map keyed by [`CodeDomain`] and differ only
//! in their reserved seed values, so each table is a [`CodeTable`] marker type
//! and all of them go through the same [`CodeRegistry`].
//!
//! Codes `0..=MAX_RESERVED_CODE` are reserved. They are written once when the
//! tables are seeded and can never be added, overwritten or removed afterwards.
//! Codes above the reserved range are custom and managed by the admin origin.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*};
use scale_info::TypeInfo;
use sp_runtime::DispatchError;
use sp_std::{marker::PhantomData, prelude::*};

use crate::{Codes, Config, Error, Event, Pallet, LOG_TARGET};

/// Highest code of the reserved range, identical for every table.
pub const MAX_RESERVED_CODE: u8 = 100;

/// Bounded reason message stored against a code.
pub type CodeMessage<T> = BoundedVec<u8, <T as Config>::MaxMessageLength>;

/// The table a code belongs to.
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub enum CodeDomain {
    TransferRestriction,
    Burn,
    Mint,
    Block,
}

/// A code table: its storage domain and the reserved entries it is seeded with.
pub trait CodeTable {
    const DOMAIN: CodeDomain;
    const RESERVED: &'static [(u8, &'static str)];
}

/// Reasons returned by `detect_transfer_restriction`.
pub struct RestrictionCodes;

impl CodeTable for RestrictionCodes {
    const DOMAIN: CodeDomain = CodeDomain::TransferRestriction;
    const RESERVED: &'static [(u8, &'static str)] = &[
        (0, "NO_RESTRICTIONS"),
        (1, "FROM_NOT_IN_KYC_ROLE"),
        (2, "TO_NOT_IN_KYC_ROLE"),
        (3, "FROM_IN_TRANSFERBLOCK_ROLE"),
        (4, "TO_IN_TRANSFERBLOCK_ROLE"),
        (5, "NOT_ENOUGH_FUNDS"),
        (6, "NOT_ENOUGH_UNALLOCATED_FUNDS"),
    ];
}

/// Reasons accepted by `burn`.
pub struct BurnCodes;

impl CodeTable for BurnCodes {
    const DOMAIN: CodeDomain = CodeDomain::Burn;
    const RESERVED: &'static [(u8, &'static str)] =
        &[(0, "KYC_ISSUE"), (1, "REFUND_EXIT"), (2, "REPLACE_TOKENS"), (3, "OTHER")];
}

/// Reasons accepted by `mint_to`.
pub struct MintCodes;

impl CodeTable for MintCodes {
    const DOMAIN: CodeDomain = CodeDomain::Mint;
    const RESERVED: &'static [(u8, &'static str)] = &[
        (0, "CRT_SALE"),
        (1, "ANNUAL_ISSUANCE_FEE"),
        (2, "QUARTERLY_ISSUANCE_FEE"),
        (3, "REPLACE_TOKENS"),
        (4, "OTHER"),
    ];
}

/// Reasons an account can be put into a transfer block for.
pub struct BlockCodes;

impl CodeTable for BlockCodes {
    const DOMAIN: CodeDomain = CodeDomain::Block;
    const RESERVED: &'static [(u8, &'static str)] = &[
        (0, "KYC_ISSUE"),
        (1, "KYT_ISSUE"),
        (2, "LOST_TOKENS"),
        (3, "MAINTENANCE"),
        (4, "OTHER"),
    ];
}

/// Length of the longest reserved message across all tables.
pub(crate) fn longest_reserved_message() -> usize {
    [RestrictionCodes::RESERVED, BurnCodes::RESERVED, MintCodes::RESERVED, BlockCodes::RESERVED]
        .iter()
        .flat_map(|table| table.iter())
        .map(|(_, message)| message.len())
        .max()
        .unwrap_or(0)
}

/// Seed all four tables with their reserved entries.
pub(crate) fn seed_reserved_tables<T: Config>() {
    CodeRegistry::<T, RestrictionCodes>::seed();
    CodeRegistry::<T, BurnCodes>::seed();
    CodeRegistry::<T, MintCodes>::seed();
    CodeRegistry::<T, BlockCodes>::seed();
}

/// Whether all four tables hold their reserved entries unchanged.
pub(crate) fn reserved_tables_intact<T: Config>() -> bool {
    CodeRegistry::<T, RestrictionCodes>::is_seeded() &&
        CodeRegistry::<T, BurnCodes>::is_seeded() &&
        CodeRegistry::<T, MintCodes>::is_seeded() &&
        CodeRegistry::<T, BlockCodes>::is_seeded()
}

/// Storage-backed operations over one code table.
pub struct CodeRegistry<T, D>(PhantomData<(T, D)>);

impl<T: Config, D: CodeTable> CodeRegistry<T, D> {
    pub fn is_reserved(code: u8) -> bool {
        code <= MAX_RESERVED_CODE
    }

    pub fn contains(code: u8) -> bool {
        Codes::<T>::contains_key(D::DOMAIN, code)
    }

    pub fn ensure_exists(code: u8) -> DispatchResult {
        ensure!(Self::contains(code), Error::<T>::CodeNotFound);
        Ok(())
    }

    pub fn message_for(code: u8) -> Result<CodeMessage<T>, DispatchError> {
        Codes::<T>::get(D::DOMAIN, code).ok_or_else(|| Error::<T>::CodeNotFound.into())
    }

    /// Adds a custom code. Reserved and already-present codes are rejected.
    pub fn set_code(code: u8, message: CodeMessage<T>) -> DispatchResult {
        ensure!(!Self::is_reserved(code), Error::<T>::CodeReserved);
        ensure!(!Self::contains(code), Error::<T>::CodeAlreadyExists);

        Codes::<T>::insert(D::DOMAIN, code, message);
        log::info!(target: LOG_TARGET, "{:?} code {} added", D::DOMAIN, code);
        Pallet::<T>::deposit_event(Event::CodeSet { domain: D::DOMAIN, code });
        Ok(())
    }

    /// Checks that `remove_code` would succeed without touching storage.
    pub fn ensure_removable(code: u8) -> DispatchResult {
        ensure!(!Self::is_reserved(code), Error::<T>::CodeReserved);
        Self::ensure_exists(code)
    }

    pub fn remove_code(code: u8) -> DispatchResult {
        Self::ensure_removable(code)?;

        Codes::<T>::remove(D::DOMAIN, code);
        log::info!(target: LOG_TARGET, "{:?} code {} removed", D::DOMAIN, code);
        Pallet::<T>::deposit_event(Event::CodeRemoved { domain: D::DOMAIN, code });
        Ok(())
    }

    /// Writes the reserved entries. Messages longer than `MaxMessageLength`
    /// are truncated; `integrity_test` rules that out for real runtimes.
    pub(crate) fn seed() {
        for (code, message) in D::RESERVED {
            Codes::<T>::insert(D::DOMAIN, code, BoundedVec::truncate_from(message.as_bytes().to_vec()));
        }
    }

    pub(crate) fn is_seeded() -> bool {
        D::RESERVED.iter().all(|(code, message)| {
            Codes::<T>::get(D::DOMAIN, code).is_some_and(|stored| stored.as_slice() == message.as_bytes())
        })
    }
}

impl<T: Config> Pallet<T> {
    pub fn message_for_restriction_code(code: u8) -> Result<CodeMessage<T>, DispatchError> {
        CodeRegistry::<T, RestrictionCodes>::message_for(code)
    }

    pub fn message_for_burn_code(code: u8) -> Result<CodeMessage<T>, DispatchError> {
        CodeRegistry::<T, BurnCodes>::message_for(code)
    }

    pub fn message_for_mint_code(code: u8) -> Result<CodeMessage<T>, DispatchError> {
        CodeRegistry::<T, MintCodes>::message_for(code)
    }

    pub fn message_for_block_code(code: u8) -> Result<CodeMessage<T>, DispatchError> {
        CodeRegistry::<T, BlockCodes>::message_for(code)
    }
}
