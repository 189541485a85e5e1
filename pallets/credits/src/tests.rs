use crate::{mock::*, Balances, Error, Event};
use frame_support::{assert_noop, assert_ok};
use sportwarren_primitives::{AssetSpec, CreditLedger, ErrorClass};

fn spec(total_supply: u128) -> AssetSpec {
    AssetSpec {
        name: b"Test Credit".to_vec().try_into().unwrap(),
        unit: b"TC".to_vec().try_into().unwrap(),
        total_supply,
        decimals: 0,
    }
}

fn issue(total_supply: u128) -> u32 {
    Credits::issue(&ISSUER, spec(total_supply)).unwrap()
}

fn sum_of_balances(asset: u32) -> u128 {
    Balances::<Test>::iter_prefix_values(asset).sum()
}

#[test]
fn issue_credits_whole_supply_to_issuer() {
    new_test_ext().execute_with(|| {
        let asset = issue(1_000);
        assert_eq!(Credits::balance(asset, &ISSUER), 1_000);
        assert_eq!(Credits::total_supply(asset), 1_000);
        assert_eq!(Credits::details(asset).unwrap().issuer, ISSUER);
        System::assert_last_event(
            Event::Issued { asset_id: asset, issuer: ISSUER, total_supply: 1_000 }.into(),
        );
    });
}

#[test]
fn asset_ids_increase() {
    new_test_ext().execute_with(|| {
        let first = issue(10);
        let second = issue(10);
        assert!(second > first);
    });
}

#[test]
fn zero_supply_is_rejected() {
    new_test_ext().execute_with(|| {
        assert_noop!(Credits::issue(&ISSUER, spec(0)), Error::<Test>::ZeroSupply);
    });
}

#[test]
fn distribute_moves_from_reserve() {
    new_test_ext().execute_with(|| {
        let asset = issue(1_000);
        assert_ok!(Credits::distribute(asset, &ISSUER, &ALICE, 100));
        assert_eq!(Credits::balance(asset, &ALICE), 100);
        assert_eq!(Credits::balance(asset, &ISSUER), 900);
        assert_eq!(sum_of_balances(asset), 1_000);
    });
}

#[test]
fn exhausted_reserve_rejects_distribution() {
    new_test_ext().execute_with(|| {
        let asset = issue(150);
        assert_ok!(Credits::distribute(asset, &ISSUER, &ALICE, 100));
        assert_noop!(
            Credits::distribute(asset, &ISSUER, &BOB, 100),
            Error::<Test>::InsufficientBalance
        );
    });
}

#[test]
fn only_issuer_moves_balances() {
    new_test_ext().execute_with(|| {
        let asset = issue(1_000);
        assert_ok!(Credits::distribute(asset, &ISSUER, &ALICE, 100));
        assert_noop!(Credits::distribute(asset, &ALICE, &BOB, 10), Error::<Test>::NotIssuer);
        assert_noop!(
            Credits::force_transfer(asset, &ALICE, &ALICE, &BOB, 10),
            Error::<Test>::NotIssuer
        );
        assert_noop!(Credits::set_frozen(asset, &BOB, &ALICE, true), Error::<Test>::NotIssuer);
    });
}

#[test]
fn unknown_asset_is_not_found() {
    new_test_ext().execute_with(|| {
        assert_noop!(Credits::distribute(7, &ISSUER, &ALICE, 1), Error::<Test>::UnknownAsset);
        assert_eq!(Credits::total_supply(7), 0);
        assert_eq!(Error::<Test>::UnknownAsset.class(), ErrorClass::NotFound);
    });
}

#[test]
fn force_transfer_requires_sufficient_balance() {
    new_test_ext().execute_with(|| {
        let asset = issue(10_000);
        assert_ok!(Credits::distribute(asset, &ISSUER, &ALICE, 1_000));

        assert_ok!(Credits::force_transfer(asset, &ISSUER, &ALICE, &BOB, 400));
        assert_eq!(Credits::balance(asset, &ALICE), 600);
        assert_eq!(Credits::balance(asset, &BOB), 400);

        assert_noop!(
            Credits::force_transfer(asset, &ISSUER, &ALICE, &BOB, 1_200),
            Error::<Test>::InsufficientBalance
        );
        assert_eq!(sum_of_balances(asset), 10_000);
    });
}

#[test]
fn frozen_holder_cannot_be_debited() {
    new_test_ext().execute_with(|| {
        let asset = issue(1_000);
        assert_ok!(Credits::distribute(asset, &ISSUER, &ALICE, 100));
        assert_ok!(Credits::set_frozen(asset, &ISSUER, &ALICE, true));
        assert!(Credits::is_frozen(asset, &ALICE));

        assert_noop!(
            Credits::force_transfer(asset, &ISSUER, &ALICE, &BOB, 10),
            Error::<Test>::AccountFrozen
        );
        // Frozen holders can still receive.
        assert_ok!(Credits::distribute(asset, &ISSUER, &ALICE, 10));

        assert_ok!(Credits::set_frozen(asset, &ISSUER, &ALICE, false));
        assert_ok!(Credits::force_transfer(asset, &ISSUER, &ALICE, &BOB, 10));
        assert_eq!(Credits::balance(asset, &BOB), 10);
    });
}
