use crate::{mock::*, Disputes, Error, Event, LastMatchId, Matches, Oracles, Verifications};
use frame_support::{assert_noop, assert_ok, dispatch::DispatchResult};
use sportwarren_primitives::{ErrorClass, Phase, VerifierRole};

fn bounded<S: sp_core::Get<u32>>(bytes: &[u8]) -> sp_runtime::BoundedVec<u8, S> {
    bytes.to_vec().try_into().unwrap()
}

fn submit(who: u64) -> DispatchResult {
    MatchVerification::submit_match(
        RuntimeOrigin::signed(who),
        bounded(b"Warren FC"),
        bounded(b"Rovers"),
        3,
        1,
        bounded(b"{\"venue\":\"Hackney Marshes\"}"),
    )
}

fn verify(who: u64, match_id: u64, confirm: bool, role: VerifierRole) -> DispatchResult {
    MatchVerification::verify_match(RuntimeOrigin::signed(who), match_id, confirm, role)
}

fn dispute(who: u64, match_id: u64) -> DispatchResult {
    MatchVerification::dispute_match(
        RuntimeOrigin::signed(who),
        match_id,
        bounded(b"wrong score"),
        bounded(b"ipfs://video"),
    )
}

fn phase(match_id: u64) -> Phase {
    Matches::<Test>::get(match_id).unwrap().phase
}

#[test]
fn registration_grants_starting_reputation() {
    new_test_ext().execute_with(|| {
        assert_eq!(Oracles::<Test>::get(REF_A).unwrap().reputation, 100);
        assert_noop!(
            MatchVerification::register(RuntimeOrigin::signed(REF_A)),
            Error::<Test>::AlreadyRegistered
        );
    });
}

#[test]
fn match_ids_strictly_increase() {
    new_test_ext().execute_with(|| {
        assert_ok!(submit(SUBMITTER));
        assert_ok!(submit(REF_A));
        assert_eq!(LastMatchId::<Test>::get(), 2);
        System::assert_last_event(Event::MatchSubmitted { match_id: 2, submitter: REF_A }.into());
        assert_eq!(phase(1), Phase::Active);
    });
}

#[test]
fn submission_requires_reputation_threshold() {
    new_test_ext().execute_with(|| {
        assert_noop!(submit(OUTSIDER), Error::<Test>::NotRegistered);
        assert_ok!(MatchVerification::update_reputation(
            RuntimeOrigin::signed(AUTHORITY),
            FAN,
            -60,
            bounded(b"spam"),
        ));
        assert_noop!(submit(FAN), Error::<Test>::InsufficientReputation);
    });
}

#[test]
fn one_referee_leaves_match_pending() {
    new_test_ext().execute_with(|| {
        assert_ok!(submit(SUBMITTER));
        assert_ok!(verify(REF_A, 1, true, VerifierRole::Referee));

        let record = Matches::<Test>::get(1u64).unwrap();
        assert_eq!(record.verification_weight, 150);
        assert_eq!(record.phase, Phase::Active);
    });
}

#[test]
fn two_referees_verify_match() {
    new_test_ext().execute_with(|| {
        assert_ok!(submit(SUBMITTER));
        assert_ok!(verify(REF_A, 1, true, VerifierRole::Referee));
        assert_ok!(verify(REF_B, 1, true, VerifierRole::Referee));

        let record = Matches::<Test>::get(1u64).unwrap();
        assert_eq!(record.verification_weight, 300);
        assert_eq!(record.verifier_count, 2);
        assert_eq!(record.phase, Phase::Verified);
        assert_eq!(record.resolved_at, Some(1));
        System::assert_last_event(Event::MatchVerified { match_id: 1 }.into());
    });
}

#[test]
fn role_bonus_shapes_weight() {
    new_test_ext().execute_with(|| {
        assert_ok!(submit(SUBMITTER));
        assert_ok!(verify(FAN, 1, true, VerifierRole::Spectator));
        assert_ok!(verify(REF_A, 1, true, VerifierRole::Referee));
        assert_eq!(phase(1), Phase::Active);
        assert_eq!(Verifications::<Test>::get(1u64, FAN).unwrap().weight, 105);

        assert_ok!(verify(REF_B, 1, true, VerifierRole::Coach));
        assert_eq!(Matches::<Test>::get(1u64).unwrap().verification_weight, 375);
        assert_eq!(phase(1), Phase::Verified);
    });
}

#[test]
fn duplicate_verification_is_rejected() {
    new_test_ext().execute_with(|| {
        assert_ok!(submit(SUBMITTER));
        assert_ok!(verify(REF_A, 1, true, VerifierRole::Referee));
        assert_noop!(verify(REF_A, 1, true, VerifierRole::Referee), Error::<Test>::AlreadyVerified);
        assert_eq!(Matches::<Test>::get(1u64).unwrap().verification_weight, 150);
    });
}

#[test]
fn submitter_cannot_verify_own_result() {
    new_test_ext().execute_with(|| {
        assert_ok!(submit(SUBMITTER));
        assert_noop!(verify(SUBMITTER, 1, true, VerifierRole::Official), Error::<Test>::SelfVerification);
        assert_noop!(verify(REF_A, 7, true, VerifierRole::Official), Error::<Test>::MatchNotFound);
    });
}

#[test]
fn refusing_verdict_counts_verifier_but_adds_no_weight() {
    new_test_ext().execute_with(|| {
        assert_ok!(submit(SUBMITTER));
        assert_ok!(verify(REF_A, 1, false, VerifierRole::Referee));

        let record = Matches::<Test>::get(1u64).unwrap();
        assert_eq!(record.verification_weight, 0);
        assert_eq!(record.verifier_count, 1);
        assert_eq!(Oracles::<Test>::get(REF_A).unwrap().verification_count, 1);
        assert_noop!(verify(REF_A, 1, true, VerifierRole::Referee), Error::<Test>::AlreadyVerified);
    });
}

#[test]
fn two_disputes_flip_match_to_disputed() {
    new_test_ext().execute_with(|| {
        assert_ok!(submit(SUBMITTER));
        assert_ok!(dispute(REF_A, 1));
        assert_eq!(phase(1), Phase::Active);
        assert_noop!(dispute(REF_A, 1), Error::<Test>::AlreadyDisputed);

        assert_ok!(dispute(REF_B, 1));
        let record = Matches::<Test>::get(1u64).unwrap();
        assert_eq!(record.dispute_weight, 200);
        assert_eq!(record.phase, Phase::Disputed);
        assert!(Disputes::<Test>::contains_key(1u64, REF_B));
        System::assert_last_event(Event::MatchDisputed { match_id: 1 }.into());

        assert_noop!(verify(FAN, 1, true, VerifierRole::Referee), Error::<Test>::MatchNotPending);
        assert_noop!(dispute(FAN, 1), Error::<Test>::MatchNotPending);
    });
}

#[test]
fn verified_match_rejects_disputes() {
    new_test_ext().execute_with(|| {
        assert_ok!(submit(SUBMITTER));
        assert_ok!(dispute(FAN, 1));
        assert_ok!(verify(REF_A, 1, true, VerifierRole::Referee));
        assert_ok!(verify(REF_B, 1, true, VerifierRole::Referee));
        assert_eq!(phase(1), Phase::Verified);

        assert_noop!(dispute(REF_A, 1), Error::<Test>::MatchNotPending);
        assert_eq!(Matches::<Test>::get(1u64).unwrap().dispute_weight, 100);
    });
}

#[test]
fn reputation_updates_are_authority_only_and_floor_at_zero() {
    new_test_ext().execute_with(|| {
        let update = |who, target, delta| {
            MatchVerification::update_reputation(RuntimeOrigin::signed(who), target, delta, bounded(b"audit"))
        };

        assert_noop!(update(REF_A, REF_B, 50), Error::<Test>::NotAuthorized);
        assert_noop!(update(AUTHORITY, OUTSIDER, 50), Error::<Test>::NotRegistered);

        assert_ok!(update(AUTHORITY, REF_A, 250));
        assert_eq!(Oracles::<Test>::get(REF_A).unwrap().reputation, 350);

        assert_ok!(update(AUTHORITY, REF_B, -1_000));
        assert_eq!(Oracles::<Test>::get(REF_B).unwrap().reputation, 0);
        System::assert_last_event(
            Event::ReputationUpdated { who: REF_B, old: 100, new: 0, reason: bounded(b"audit") }.into(),
        );
    });
}

#[test]
fn lowering_min_verifications_takes_effect() {
    new_test_ext().execute_with(|| {
        assert_noop!(
            MatchVerification::update_settings(RuntimeOrigin::signed(AUTHORITY), 0, 50),
            Error::<Test>::InvalidSettings
        );
        assert_ok!(MatchVerification::update_settings(RuntimeOrigin::signed(AUTHORITY), 1, 50));

        assert_ok!(submit(SUBMITTER));
        assert_ok!(verify(FAN, 1, true, VerifierRole::Spectator));
        assert_eq!(phase(1), Phase::Verified);
    });
}

#[test]
fn closed_application_rejects_submissions() {
    new_test_ext().execute_with(|| {
        assert_ok!(submit(SUBMITTER));
        assert_ok!(MatchVerification::close_application(RuntimeOrigin::signed(AUTHORITY)));
        assert_noop!(submit(SUBMITTER), Error::<Test>::ApplicationClosed);
        assert_noop!(verify(REF_A, 1, true, VerifierRole::Referee), Error::<Test>::ApplicationClosed);
        assert!(Matches::<Test>::contains_key(1u64));
    });
}

#[test]
fn error_classes() {
    assert_eq!(Error::<Test>::SelfVerification.class(), ErrorClass::Authorization);
    assert_eq!(Error::<Test>::MatchNotFound.class(), ErrorClass::NotFound);
    assert_eq!(Error::<Test>::MatchNotPending.class(), ErrorClass::State);
    assert_eq!(Error::<Test>::AlreadyDisputed.class(), ErrorClass::DuplicateAction);
    assert_eq!(Error::<Test>::Overflow.class(), ErrorClass::Bounds);
}
