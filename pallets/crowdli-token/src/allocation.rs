//! Property allocations.
//!
//! Part of a holder's balance can be locked against a property. Locked tokens
//! stay in the balance but cannot be transferred or burned until they are
//! unallocated again. `TotalAllocated` caches the per-owner sum so transfer
//! checks never iterate an owner's allocations.

use frame_support::{dispatch::DispatchResult, ensure};

use crate::{Allocations, Balances, Config, Error, Event, Pallet, TotalAllocated};

impl<T: Config> Pallet<T> {
    /// Balance that is not locked against any property.
    pub fn unallocated_balance(owner: &T::AccountId) -> u128 {
        Balances::<T>::get(owner).saturating_sub(TotalAllocated::<T>::get(owner))
    }

    pub(crate) fn do_allocate(
        owner: T::AccountId,
        property: T::PropertyId,
        amount: u128,
    ) -> DispatchResult {
        ensure!(amount <= Self::unallocated_balance(&owner), Error::<T>::InsufficientUnallocated);

        if amount > 0 {
            // Both counters stay below the owner's balance, so neither can overflow.
            Allocations::<T>::mutate(&owner, property, |locked| *locked = locked.saturating_add(amount));
            TotalAllocated::<T>::mutate(&owner, |total| *total = total.saturating_add(amount));
        }

        Self::deposit_event(Event::Allocate { owner, property, amount });
        Ok(())
    }

    pub(crate) fn do_unallocate(
        owner: T::AccountId,
        property: T::PropertyId,
        amount: u128,
    ) -> DispatchResult {
        let locked = Allocations::<T>::get(&owner, property);
        ensure!(locked != 0, Error::<T>::NoAllocationForProperty);
        ensure!(amount <= locked, Error::<T>::InsufficientLocked);

        let remaining = locked - amount;
        if remaining == 0 {
            Allocations::<T>::remove(&owner, property);
        } else {
            Allocations::<T>::insert(&owner, property, remaining);
        }

        TotalAllocated::<T>::mutate_exists(&owner, |total| {
            let left = total.unwrap_or_default().saturating_sub(amount);
            *total = (left > 0).then_some(left);
        });

        Self::deposit_event(Event::Unallocate { owner, property, amount });
        Ok(())
    }
}
