//! Transfer restriction detection.
//!
//! Every balance movement between accounts is gated by
//! [`Pallet::detect_transfer_restriction`]. The checks run in a fixed order and
//! the first one that fails determines the code, so a sender outside the KYC
//! role is reported as such even if it is also blocked or underfunded.

use crate::{Balances, Config, Pallet, TransferBlocks, Whitelist};

pub const NO_RESTRICTIONS: u8 = 0;
pub const FROM_NOT_IN_KYC_ROLE: u8 = 1;
pub const TO_NOT_IN_KYC_ROLE: u8 = 2;
pub const FROM_IN_TRANSFERBLOCK_ROLE: u8 = 3;
pub const TO_IN_TRANSFERBLOCK_ROLE: u8 = 4;
pub const NOT_ENOUGH_FUNDS: u8 = 5;
pub const NOT_ENOUGH_UNALLOCATED_FUNDS: u8 = 6;

impl<T: Config> Pallet<T> {
    /// Returns the restriction code a transfer of `amount` from `from` to `to`
    /// would fail with, or [`NO_RESTRICTIONS`]. Reads state only.
    pub fn detect_transfer_restriction(from: &T::AccountId, to: &T::AccountId, amount: u128) -> u8 {
        if !Whitelist::<T>::get(from) {
            FROM_NOT_IN_KYC_ROLE
        } else if !Whitelist::<T>::get(to) {
            TO_NOT_IN_KYC_ROLE
        } else if Self::is_blocked(from) {
            FROM_IN_TRANSFERBLOCK_ROLE
        } else if Self::is_blocked(to) {
            TO_IN_TRANSFERBLOCK_ROLE
        } else if Balances::<T>::get(from) < amount {
            NOT_ENOUGH_FUNDS
        } else if Self::unallocated_balance(from) < amount {
            NOT_ENOUGH_UNALLOCATED_FUNDS
        } else {
            NO_RESTRICTIONS
        }
    }

    /// True while the account holds at least one block code.
    pub fn is_blocked(account: &T::AccountId) -> bool {
        TransferBlocks::<T>::iter_prefix(account).next().is_some()
    }
}
