//! # Match Verification Pallet
//!
//! Crowd-verified match results. Registered oracles submit results, other
//! oracles confirm them with reputation-weighted verifications or contest
//! them with reputation-weighted disputes.
//!
//! ## Resolution
//! A match stays `Active` (pending) until one of two independent tallies
//! crosses its threshold:
//! - verification weight `>= min_verifications * 100` → `Verified`
//! - dispute weight `>= 200` → `Disputed`
//!
//! Both tallies only accept contributions while the match is `Active`, so
//! whichever threshold is crossed first decides the match for good.
//!
//! Verification weight is the verifier's reputation plus the bonus of the
//! role they claim (referee 50, official 30, coach 20, player 10,
//! spectator 5). Dispute weight is the disputer's reputation.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

const LOG_TARGET: &str = "runtime::matches";

#[frame_support::pallet]
pub mod pallet {
    use super::LOG_TARGET;
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;
    use sportwarren_primitives::*;

    // ================================================================
    // Types
    // ================================================================

    /// A submitted match result.
    #[derive(Clone, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    #[scale_info(skip_type_params(T))]
    pub struct MatchRecord<T: Config> {
        pub submitter: T::AccountId,
        pub home_team: BoundedTeam,
        pub away_team: BoundedTeam,
        pub home_score: u32,
        pub away_score: u32,
        pub metadata: BoundedMetadata,
        pub submitted_at: BlockNumberFor<T>,
        pub phase: Phase,
        pub verification_weight: ConsensusWeight,
        pub dispute_weight: ConsensusWeight,
        pub verifier_count: u32,
        pub dispute_count: u32,
        pub resolved_at: Option<BlockNumberFor<T>>,
    }

    /// Oracle standing, created on registration.
    #[derive(Clone, PartialEq, Eq, Default, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct Oracle {
        pub reputation: ReputationScore,
        pub verification_count: u32,
    }

    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct Verification {
        pub confirm: bool,
        pub role: VerifierRole,
        /// Weight added to the match. Zero for a non-confirming verdict.
        pub weight: ConsensusWeight,
    }

    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct Dispute {
        pub reason: BoundedDescription,
        pub evidence: BoundedEvidence,
        pub weight: ConsensusWeight,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Default, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct MatchSettings {
        pub min_verifications: u32,
        pub reputation_threshold: ReputationScore,
    }

    // ================================================================
    // Config
    // ================================================================

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Reputation an oracle starts with.
        #[pallet::constant]
        type StartingReputation: Get<ReputationScore>;

        #[pallet::constant]
        type DefaultMinVerifications: Get<u32>;

        /// Reputation needed to submit, verify or dispute.
        #[pallet::constant]
        type DefaultReputationThreshold: Get<ReputationScore>;

        type WeightInfo: WeightInfo;
    }

    pub trait WeightInfo {
        fn initialize() -> Weight;
        fn register() -> Weight;
        fn update_settings() -> Weight;
        fn close_application() -> Weight;
        fn submit_match() -> Weight;
        fn verify_match() -> Weight;
        fn dispute_match() -> Weight;
        fn update_reputation() -> Weight;
    }

    pub struct DefaultWeightInfo;
    impl WeightInfo for DefaultWeightInfo {
        fn initialize() -> Weight { Weight::from_parts(20_000_000, 0) }
        fn register() -> Weight { Weight::from_parts(25_000_000, 0) }
        fn update_settings() -> Weight { Weight::from_parts(15_000_000, 0) }
        fn close_application() -> Weight { Weight::from_parts(15_000_000, 0) }
        fn submit_match() -> Weight { Weight::from_parts(50_000_000, 0) }
        fn verify_match() -> Weight { Weight::from_parts(60_000_000, 0) }
        fn dispute_match() -> Weight { Weight::from_parts(60_000_000, 0) }
        fn update_reputation() -> Weight { Weight::from_parts(30_000_000, 0) }
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn integrity_test() {
            assert!(T::DefaultMinVerifications::get() > 0, "a match needs at least one verification");
        }
    }

    // ================================================================
    // Storage
    // ================================================================

    #[pallet::storage]
    pub type App<T: Config> =
        StorageValue<_, AppInfo<T::AccountId, BlockNumberFor<T>>, OptionQuery>;

    #[pallet::storage]
    pub type Settings<T: Config> = StorageValue<_, MatchSettings, ValueQuery>;

    #[pallet::storage]
    pub type LastMatchId<T: Config> = StorageValue<_, EntityId, ValueQuery>;

    #[pallet::storage]
    pub type Matches<T: Config> =
        StorageMap<_, Blake2_128Concat, EntityId, MatchRecord<T>, OptionQuery>;

    #[pallet::storage]
    pub type Oracles<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, Oracle, OptionQuery>;

    #[pallet::storage]
    pub type Verifications<T: Config> = StorageDoubleMap<
        _, Blake2_128Concat, EntityId, Blake2_128Concat, T::AccountId,
        Verification, OptionQuery,
    >;

    #[pallet::storage]
    pub type Disputes<T: Config> = StorageDoubleMap<
        _, Blake2_128Concat, EntityId, Blake2_128Concat, T::AccountId,
        Dispute, OptionQuery,
    >;

    // ================================================================
    // Events
    // ================================================================

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        Initialized { authority: T::AccountId },
        Registered { who: T::AccountId, reputation: ReputationScore },
        SettingsUpdated { min_verifications: u32, reputation_threshold: ReputationScore },
        ApplicationClosed,
        MatchSubmitted { match_id: EntityId, submitter: T::AccountId },
        VerificationRecorded {
            match_id: EntityId,
            verifier: T::AccountId,
            confirm: bool,
            weight: ConsensusWeight,
            total_weight: ConsensusWeight,
        },
        DisputeRecorded {
            match_id: EntityId,
            disputer: T::AccountId,
            weight: ConsensusWeight,
            total_weight: ConsensusWeight,
        },
        MatchVerified { match_id: EntityId },
        MatchDisputed { match_id: EntityId },
        ReputationUpdated {
            who: T::AccountId,
            old: ReputationScore,
            new: ReputationScore,
            reason: BoundedDescription,
        },
    }

    // ================================================================
    // Errors
    // ================================================================

    #[pallet::error]
    pub enum Error<T> {
        NotInitialized,
        AlreadyInitialized,
        ApplicationClosed,
        NotAuthorized,
        NotRegistered,
        AlreadyRegistered,
        InsufficientReputation,
        MatchNotFound,
        /// The match is already verified or disputed.
        MatchNotPending,
        /// The submitter cannot verify their own result.
        SelfVerification,
        AlreadyVerified,
        AlreadyDisputed,
        InvalidSettings,
        Overflow,
    }

    impl<T> Error<T> {
        pub fn class(&self) -> ErrorClass {
            match self {
                Error::NotAuthorized | Error::InsufficientReputation | Error::SelfVerification => {
                    ErrorClass::Authorization
                }
                Error::NotRegistered | Error::MatchNotFound => ErrorClass::NotFound,
                Error::NotInitialized
                | Error::AlreadyInitialized
                | Error::ApplicationClosed
                | Error::MatchNotPending => ErrorClass::State,
                Error::AlreadyRegistered | Error::AlreadyVerified | Error::AlreadyDisputed => {
                    ErrorClass::DuplicateAction
                }
                _ => ErrorClass::Bounds,
            }
        }
    }

    impl<T> From<Denial> for Error<T> {
        fn from(denial: Denial) -> Self {
            match denial {
                Denial::NotAuthorized => Error::NotAuthorized,
                Denial::Unregistered => Error::NotRegistered,
                Denial::BelowFloor => Error::InsufficientReputation,
            }
        }
    }

    // ================================================================
    // Extrinsics
    // ================================================================

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::initialize())]
        pub fn initialize(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(!App::<T>::exists(), Error::<T>::AlreadyInitialized);

            App::<T>::put(AppInfo {
                authority: who.clone(),
                status: AppStatus::Live,
                initialized_at: <frame_system::Pallet<T>>::block_number(),
            });
            Settings::<T>::put(MatchSettings {
                min_verifications: T::DefaultMinVerifications::get(),
                reputation_threshold: T::DefaultReputationThreshold::get(),
            });

            log::info!(target: LOG_TARGET, "match verification initialized");
            Self::deposit_event(Event::Initialized { authority: who });
            Ok(())
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::register())]
        pub fn register(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            ensure!(!Oracles::<T>::contains_key(&who), Error::<T>::AlreadyRegistered);

            let reputation = T::StartingReputation::get();
            Oracles::<T>::insert(&who, Oracle { reputation, verification_count: 0 });
            Self::deposit_event(Event::Registered { who, reputation });
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::update_settings())]
        pub fn update_settings(
            origin: OriginFor<T>,
            min_verifications: u32,
            reputation_threshold: ReputationScore,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;
            ensure!(min_verifications > 0, Error::<T>::InvalidSettings);

            Settings::<T>::put(MatchSettings { min_verifications, reputation_threshold });
            Self::deposit_event(Event::SettingsUpdated { min_verifications, reputation_threshold });
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::close_application())]
        pub fn close_application(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;

            app.status = AppStatus::Closed;
            App::<T>::put(app);
            log::info!(target: LOG_TARGET, "match verification closed");
            Self::deposit_event(Event::ApplicationClosed);
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::submit_match())]
        pub fn submit_match(
            origin: OriginFor<T>,
            home_team: BoundedTeam,
            away_team: BoundedTeam,
            home_score: u32,
            away_score: u32,
            metadata: BoundedMetadata,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            Self::ensure_standing(&who)?;

            let match_id = next_id(LastMatchId::<T>::get()).ok_or(Error::<T>::Overflow)?;
            Matches::<T>::insert(match_id, MatchRecord::<T> {
                submitter: who.clone(),
                home_team,
                away_team,
                home_score,
                away_score,
                metadata,
                submitted_at: <frame_system::Pallet<T>>::block_number(),
                phase: Phase::Active,
                verification_weight: 0,
                dispute_weight: 0,
                verifier_count: 0,
                dispute_count: 0,
                resolved_at: None,
            });
            LastMatchId::<T>::put(match_id);

            Self::deposit_event(Event::MatchSubmitted { match_id, submitter: who });
            Ok(())
        }

        /// Confirm (or refuse to confirm) a pending result in the given role.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::verify_match())]
        pub fn verify_match(
            origin: OriginFor<T>,
            match_id: EntityId,
            confirm: bool,
            role: VerifierRole,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            let mut oracle = Self::ensure_standing(&who)?;
            let mut record = Matches::<T>::get(match_id).ok_or(Error::<T>::MatchNotFound)?;
            ensure!(record.phase == Phase::Active, Error::<T>::MatchNotPending);
            ensure!(record.submitter != who, Error::<T>::SelfVerification);
            ensure!(!Verifications::<T>::contains_key(match_id, &who), Error::<T>::AlreadyVerified);

            let policy = ConsensusPolicy::match_verification(Settings::<T>::get().min_verifications);
            let mut weight = 0;
            let mut decided = false;
            if confirm {
                let tally = policy
                    .contribute(
                        record.verification_weight,
                        &Contribution::with_role(oracle.reputation, role.bonus()),
                    )
                    .ok_or(Error::<T>::Overflow)?;
                weight = tally.weight;
                decided = tally.decided;
                record.verification_weight = tally.total;
            }
            record.verifier_count = record.verifier_count.checked_add(1).ok_or(Error::<T>::Overflow)?;
            oracle.verification_count = oracle.verification_count.saturating_add(1);

            let now = <frame_system::Pallet<T>>::block_number();
            if decided {
                record.phase.transition(Phase::Verified).map_err(|_| Error::<T>::MatchNotPending)?;
                record.resolved_at = Some(now);
            }

            let total_weight = record.verification_weight;
            Verifications::<T>::insert(match_id, &who, Verification { confirm, role, weight });
            Matches::<T>::insert(match_id, record);
            Oracles::<T>::insert(&who, oracle);

            Self::deposit_event(Event::VerificationRecorded {
                match_id,
                verifier: who,
                confirm,
                weight,
                total_weight,
            });
            if decided {
                log::debug!(target: LOG_TARGET, "match {} verified with weight {}", match_id, total_weight);
                Self::deposit_event(Event::MatchVerified { match_id });
            }
            Ok(())
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::dispute_match())]
        pub fn dispute_match(
            origin: OriginFor<T>,
            match_id: EntityId,
            reason: BoundedDescription,
            evidence: BoundedEvidence,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            let oracle = Self::ensure_standing(&who)?;
            let mut record = Matches::<T>::get(match_id).ok_or(Error::<T>::MatchNotFound)?;
            ensure!(record.phase == Phase::Active, Error::<T>::MatchNotPending);
            ensure!(!Disputes::<T>::contains_key(match_id, &who), Error::<T>::AlreadyDisputed);

            let tally = ConsensusPolicy::match_dispute()
                .contribute(record.dispute_weight, &Contribution::reputation(oracle.reputation))
                .ok_or(Error::<T>::Overflow)?;
            record.dispute_weight = tally.total;
            record.dispute_count = record.dispute_count.checked_add(1).ok_or(Error::<T>::Overflow)?;
            if tally.decided {
                record.phase.transition(Phase::Disputed).map_err(|_| Error::<T>::MatchNotPending)?;
                record.resolved_at = Some(<frame_system::Pallet<T>>::block_number());
            }

            Disputes::<T>::insert(match_id, &who, Dispute { reason, evidence, weight: tally.weight });
            Matches::<T>::insert(match_id, record);

            Self::deposit_event(Event::DisputeRecorded {
                match_id,
                disputer: who,
                weight: tally.weight,
                total_weight: tally.total,
            });
            if tally.decided {
                log::debug!(target: LOG_TARGET, "match {} disputed with weight {}", match_id, tally.total);
                Self::deposit_event(Event::MatchDisputed { match_id });
            }
            Ok(())
        }

        /// Authority-only reputation adjustment. Reputation never drops below zero.
        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::update_reputation())]
        pub fn update_reputation(
            origin: OriginFor<T>,
            target: T::AccountId,
            delta: i64,
            reason: BoundedDescription,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;
            let mut oracle = Oracles::<T>::get(&target).ok_or(Error::<T>::NotRegistered)?;

            let old = oracle.reputation;
            oracle.reputation = if delta >= 0 {
                old.checked_add(delta.unsigned_abs()).ok_or(Error::<T>::Overflow)?
            } else {
                old.saturating_sub(delta.unsigned_abs())
            };
            let new = oracle.reputation;
            Oracles::<T>::insert(&target, oracle);

            log::debug!(target: LOG_TARGET, "oracle reputation adjusted {} -> {}", old, new);
            Self::deposit_event(Event::ReputationUpdated { who: target, old, new, reason });
            Ok(())
        }
    }

    // ================================================================
    // Internal helpers
    // ================================================================

    impl<T: Config> Pallet<T> {
        fn ensure_live() -> Result<AppInfo<T::AccountId, BlockNumberFor<T>>, Error<T>> {
            let app = App::<T>::get().ok_or(Error::<T>::NotInitialized)?;
            ensure!(app.status == AppStatus::Live, Error::<T>::ApplicationClosed);
            Ok(app)
        }

        /// The caller's oracle record, if it clears the reputation threshold.
        fn ensure_standing(who: &T::AccountId) -> Result<Oracle, Error<T>> {
            let oracle = Oracles::<T>::get(who);
            Guard::AtLeast {
                standing: oracle.as_ref().map(|o| o.reputation),
                floor: Settings::<T>::get().reputation_threshold,
            }
            .check(who)?;
            oracle.ok_or(Error::<T>::NotRegistered)
        }
    }
}
