//! Fungible credit interface and fee arithmetic.
//!
//! Every asset has exactly one issuer, fixed at creation. The issuer holds
//! the whole supply in its reserve and is the only account that may move,
//! claw back or freeze balances of that asset. There is no mint after
//! issuance, so the sum of all balances always equals the total supply.

use crate::{AssetId, Balance, BoundedAssetName, BoundedAssetUnit};
use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_runtime::{DispatchError, DispatchResult};

/// Parameters of an asset to issue.
#[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
pub struct AssetSpec {
    pub name: BoundedAssetName,
    pub unit: BoundedAssetUnit,
    pub total_supply: Balance,
    pub decimals: u8,
}

/// An issued asset.
#[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
pub struct AssetDetails<AccountId> {
    pub issuer: AccountId,
    pub name: BoundedAssetName,
    pub unit: BoundedAssetUnit,
    pub total_supply: Balance,
    pub decimals: u8,
}

/// Interface that pallet-credits exposes to issuing applications.
pub trait CreditLedger<AccountId> {
    /// Create an asset and credit its whole supply to `issuer`.
    fn issue(issuer: &AccountId, spec: AssetSpec) -> Result<AssetId, DispatchError>;
    fn details(asset: AssetId) -> Option<AssetDetails<AccountId>>;
    fn balance(asset: AssetId, who: &AccountId) -> Balance;
    fn total_supply(asset: AssetId) -> Balance;
    /// Move `amount` from the issuer's reserve to `to`.
    fn distribute(asset: AssetId, issuer: &AccountId, to: &AccountId, amount: Balance) -> DispatchResult;
    /// Move `amount` between two holders under the issuer's clawback right.
    fn force_transfer(
        asset: AssetId,
        issuer: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Balance,
    ) -> DispatchResult;
    fn set_frozen(asset: AssetId, issuer: &AccountId, who: &AccountId, frozen: bool) -> DispatchResult;
    fn is_frozen(asset: AssetId, who: &AccountId) -> bool;
}

/// Gross amount split into platform fee and net payout.
#[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
pub struct FeeSplit {
    pub fee: Balance,
    pub net: Balance,
}

impl FeeSplit {
    /// `fee = floor(gross * rate / 100)`, `net = gross - fee`.
    ///
    /// `None` if `rate_percent > 100` or the product overflows.
    pub fn compute(gross: Balance, rate_percent: u8) -> Option<Self> {
        if rate_percent > 100 {
            return None;
        }
        let fee = gross.checked_mul(Balance::from(rate_percent))? / 100;
        let net = gross.checked_sub(fee)?;
        Some(Self { fee, net })
    }

    pub fn gross(&self) -> Balance {
        self.fee.saturating_add(self.net)
    }
}
