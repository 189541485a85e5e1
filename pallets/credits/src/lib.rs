//! # Credits Pallet
//!
//! Fixed-supply fungible credits for the SportWarren applications.
//!
//! ## Model
//! - **Issuance**: an application issues an asset once, at its own
//!   initialization. The full supply lands in the issuer's reserve.
//!   There is no later mint and no burn.
//! - **Single authority**: only the issuer may distribute from its reserve,
//!   move balances between holders (clawback), or freeze a holder.
//!   Holders cannot transfer on their own.
//! - **Conservation**: every movement debits exactly what it credits, so the
//!   sum of balances of an asset always equals its total supply.
//!
//! No public extrinsics. Applications interact through [`CreditLedger`].

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

const LOG_TARGET: &str = "runtime::credits";

#[frame_support::pallet]
pub mod pallet {
    use super::LOG_TARGET;
    use frame_support::pallet_prelude::*;
    use sportwarren_primitives::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    // ================================================================
    // Storage
    // ================================================================

    #[pallet::storage]
    pub type NextAssetId<T: Config> = StorageValue<_, AssetId, ValueQuery>;

    #[pallet::storage]
    pub type Assets<T: Config> =
        StorageMap<_, Blake2_128Concat, AssetId, AssetDetails<T::AccountId>, OptionQuery>;

    #[pallet::storage]
    pub type Balances<T: Config> = StorageDoubleMap<
        _, Blake2_128Concat, AssetId, Blake2_128Concat, T::AccountId,
        Balance, ValueQuery,
    >;

    /// Holders whose balance of an asset may not be moved out.
    #[pallet::storage]
    pub type Frozen<T: Config> = StorageDoubleMap<
        _, Blake2_128Concat, AssetId, Blake2_128Concat, T::AccountId,
        (), OptionQuery,
    >;

    // ================================================================
    // Events
    // ================================================================

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        Issued { asset_id: AssetId, issuer: T::AccountId, total_supply: Balance },
        Distributed { asset_id: AssetId, to: T::AccountId, amount: Balance },
        Transferred { asset_id: AssetId, from: T::AccountId, to: T::AccountId, amount: Balance },
        Frozen { asset_id: AssetId, who: T::AccountId },
        Thawed { asset_id: AssetId, who: T::AccountId },
    }

    // ================================================================
    // Errors
    // ================================================================

    #[pallet::error]
    pub enum Error<T> {
        UnknownAsset,
        /// Only the issuer may move, claw back or freeze this asset.
        NotIssuer,
        InsufficientBalance,
        AccountFrozen,
        ZeroSupply,
        Overflow,
    }

    impl<T> Error<T> {
        pub fn class(&self) -> ErrorClass {
            match self {
                Error::UnknownAsset => ErrorClass::NotFound,
                Error::NotIssuer | Error::AccountFrozen => ErrorClass::Authorization,
                _ => ErrorClass::Bounds,
            }
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        // No public extrinsics, applications go through CreditLedger
    }

    // ================================================================
    // Internal helpers
    // ================================================================

    impl<T: Config> Pallet<T> {
        fn ensure_issuer(asset: AssetId, who: &T::AccountId) -> Result<AssetDetails<T::AccountId>, Error<T>> {
            let details = Assets::<T>::get(asset).ok_or(Error::<T>::UnknownAsset)?;
            ensure!(&details.issuer == who, Error::<T>::NotIssuer);
            Ok(details)
        }

        fn move_balance(
            asset: AssetId,
            from: &T::AccountId,
            to: &T::AccountId,
            amount: Balance,
        ) -> Result<(), Error<T>> {
            let from_balance = Balances::<T>::get(asset, from);
            ensure!(from_balance >= amount, Error::<T>::InsufficientBalance);
            if from == to || amount == 0 {
                return Ok(());
            }
            let to_balance = Balances::<T>::get(asset, to)
                .checked_add(amount)
                .ok_or(Error::<T>::Overflow)?;
            Balances::<T>::insert(asset, from, from_balance - amount);
            Balances::<T>::insert(asset, to, to_balance);
            Ok(())
        }
    }

    impl<T: Config> CreditLedger<T::AccountId> for Pallet<T> {
        fn issue(issuer: &T::AccountId, spec: AssetSpec) -> Result<AssetId, DispatchError> {
            ensure!(spec.total_supply > 0, Error::<T>::ZeroSupply);
            let asset_id = NextAssetId::<T>::get();
            NextAssetId::<T>::put(asset_id.checked_add(1).ok_or(Error::<T>::Overflow)?);

            Assets::<T>::insert(asset_id, AssetDetails {
                issuer: issuer.clone(),
                name: spec.name,
                unit: spec.unit,
                total_supply: spec.total_supply,
                decimals: spec.decimals,
            });
            Balances::<T>::insert(asset_id, issuer, spec.total_supply);

            log::info!(target: LOG_TARGET, "issued asset {} with supply {}", asset_id, spec.total_supply);
            Self::deposit_event(Event::Issued {
                asset_id,
                issuer: issuer.clone(),
                total_supply: spec.total_supply,
            });
            Ok(asset_id)
        }

        fn details(asset: AssetId) -> Option<AssetDetails<T::AccountId>> {
            Assets::<T>::get(asset)
        }

        fn balance(asset: AssetId, who: &T::AccountId) -> Balance {
            Balances::<T>::get(asset, who)
        }

        fn total_supply(asset: AssetId) -> Balance {
            Assets::<T>::get(asset).map(|a| a.total_supply).unwrap_or(0)
        }

        fn distribute(asset: AssetId, issuer: &T::AccountId, to: &T::AccountId, amount: Balance) -> DispatchResult {
            Self::ensure_issuer(asset, issuer)?;
            Self::move_balance(asset, issuer, to, amount)?;
            Self::deposit_event(Event::Distributed { asset_id: asset, to: to.clone(), amount });
            Ok(())
        }

        fn force_transfer(
            asset: AssetId,
            issuer: &T::AccountId,
            from: &T::AccountId,
            to: &T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            Self::ensure_issuer(asset, issuer)?;
            ensure!(!Frozen::<T>::contains_key(asset, from), Error::<T>::AccountFrozen);
            Self::move_balance(asset, from, to, amount)?;
            Self::deposit_event(Event::Transferred {
                asset_id: asset,
                from: from.clone(),
                to: to.clone(),
                amount,
            });
            Ok(())
        }

        fn set_frozen(asset: AssetId, issuer: &T::AccountId, who: &T::AccountId, frozen: bool) -> DispatchResult {
            Self::ensure_issuer(asset, issuer)?;
            if frozen {
                Frozen::<T>::insert(asset, who, ());
                Self::deposit_event(Event::Frozen { asset_id: asset, who: who.clone() });
            } else {
                Frozen::<T>::remove(asset, who);
                Self::deposit_event(Event::Thawed { asset_id: asset, who: who.clone() });
            }
            Ok(())
        }

        fn is_frozen(asset: AssetId, who: &T::AccountId) -> bool {
            Frozen::<T>::contains_key(asset, who)
        }
    }
}
