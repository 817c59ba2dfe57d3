//! Storage migrations for pallet-crowdli-token.
//!
//! Each migration is idempotent and bumps the on-chain storage version when it
//! is behind. Wire them into the runtime's `Executive`
//! migration tuple in order:
//!
//! ```ignore
//! pub type Executive = frame_executive::Executive<
//!     Runtime,
//!     Block,
//!     frame_system::ChainContext<Runtime>,
//!     Runtime,
//!     AllPalletsWithSystem,
//!     (pallet_crowdli_token::migrations::v1::MigrateToV1<Runtime>,),
//! >;
//! ```

use frame_support::{pallet_prelude::*, traits::OnRuntimeUpgrade};
use sp_std::marker::PhantomData;

use crate::{codes, Config, Pallet, LOG_TARGET};

/// Version 0 → 1: seed the reserved code tables.
///
/// Genesis seeds the tables on new chains. When the pallet is added to a live
/// chain by a runtime upgrade the genesis build never runs, so this migration
/// writes the reserved codes instead. On such a chain `Executive` has already
/// stamped the in-code storage version before migrations run, so whether to
/// seed is decided by the tables themselves, not by the version.
pub mod v1 {
    use super::*;

    /// Reserved entries across the four tables.
    const RESERVED_ENTRIES: u64 = 21;

    pub struct MigrateToV1<T>(PhantomData<T>);

    impl<T: Config> OnRuntimeUpgrade for MigrateToV1<T> {
        fn on_runtime_upgrade() -> Weight {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();
            let mut writes = 0;

            if !codes::reserved_tables_intact::<T>() {
                codes::seed_reserved_tables::<T>();
                writes += RESERVED_ENTRIES;
                log::info!(target: LOG_TARGET, "Reserved code tables seeded");
            } else {
                log::info!(target: LOG_TARGET, "Reserved code tables intact, nothing to seed");
            }

            if on_chain_version < 1 {
                StorageVersion::new(1).put::<Pallet<T>>();
                writes += 1;
                log::info!(target: LOG_TARGET, "Migrated storage to v1");
            }

            T::DbWeight::get().reads_writes(1 + RESERVED_ENTRIES, writes)
        }

        #[cfg(feature = "try-runtime")]
        fn pre_upgrade() -> Result<sp_std::vec::Vec<u8>, sp_runtime::TryRuntimeError> {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();
            log::info!(
                target: LOG_TARGET,
                "Pre-upgrade: on-chain storage version is {:?}",
                on_chain_version
            );
            Ok(on_chain_version.encode())
        }

        #[cfg(feature = "try-runtime")]
        fn post_upgrade(state: sp_std::vec::Vec<u8>) -> Result<(), sp_runtime::TryRuntimeError> {
            let pre_version: StorageVersion = Decode::decode(&mut &state[..])
                .map_err(|_| sp_runtime::TryRuntimeError::Other("Failed to decode pre-state"))?;
            let on_chain_version = Pallet::<T>::on_chain_storage_version();

            frame_support::ensure!(
                on_chain_version >= 1 && on_chain_version >= pre_version,
                sp_runtime::TryRuntimeError::Other("Migration to v1 did not complete")
            );
            frame_support::ensure!(
                codes::reserved_tables_intact::<T>(),
                sp_runtime::TryRuntimeError::Other("Reserved code tables missing after v1")
            );
            Ok(())
        }
    }
}
