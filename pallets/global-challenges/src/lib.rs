//! # Global Challenges Pallet
//!
//! Prize-bearing challenges that registered members join, report progress
//! on, and vouch for each other in.
//!
//! ## Lifecycle
//! - **Initialize**: the first caller becomes the application authority.
//! - **Register**: members opt in with a self-declared reputation, capped
//!   below the sponsor floor. Only the authority can raise it further.
//! - **Create**: the authority, or any member with reputation at or above
//!   the sponsor floor, opens a challenge running `duration` rounds from now.
//! - **Join**: while active and before the end round, subject to the
//!   challenge's reputation minimum and participant cap.
//! - **Progress**: participants submit scores; only improvements are kept.
//! - **Verify**: members above the verifier floor approve or reject another
//!   participant's progress, once per (challenge, participant, verifier).
//! - **Finalize**: after the end round, by the challenge creator or authority.
//! - **Distribute**: the authority settles a finalized challenge once,
//!   taking the platform fee from the gross amount.
//!
//! ## Accounting
//! `TotalPrizePool` is the sum of prize pools of challenges that are not
//! yet settled. `ActiveChallenges` counts challenges in the active phase.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[cfg(test)]
mod mock;

const LOG_TARGET: &str = "runtime::challenges";

#[frame_support::pallet]
pub mod pallet {
    use super::LOG_TARGET;
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;
    use sp_runtime::traits::Zero;
    use sportwarren_primitives::{consensus::ConsensusPolicy, *};

    // ================================================================
    // Types
    // ================================================================

    /// A prize-bearing challenge.
    #[derive(Clone, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    #[scale_info(skip_type_params(T))]
    pub struct Challenge<T: Config> {
        pub creator: T::AccountId,
        pub title: BoundedTitle,
        pub description: BoundedDescription,
        pub challenge_type: BoundedCategory,
        /// Sponsor display name.
        pub sponsor: BoundedTitle,
        pub prize_pool: Balance,
        pub min_reputation: ReputationScore,
        pub max_participants: u32,
        pub participants: u32,
        pub window: Window<BlockNumberFor<T>>,
        pub phase: Phase,
        pub finalized_at: Option<BlockNumberFor<T>>,
        pub settlement: Option<Settlement<T::AccountId>>,
    }

    /// Outcome of `distribute_prizes`. Present at most once per challenge.
    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct Settlement<AccountId> {
        pub winner: AccountId,
        pub gross: Balance,
        pub fee: Balance,
        pub net: Balance,
    }

    /// Per-member record created on registration.
    #[derive(Clone, PartialEq, Eq, Default, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct Profile {
        pub reputation: ReputationScore,
        pub challenges_joined: u32,
        pub total_winnings: Balance,
    }

    /// A participant's standing in one challenge.
    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct Participation<BlockNumber> {
        /// Best score submitted so far.
        pub score: u64,
        pub evidence: BoundedEvidence,
        pub verified_count: u32,
        pub joined_at: BlockNumber,
        pub last_update: BlockNumber,
    }

    // ================================================================
    // Config
    // ================================================================

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Platform fee written on initialization, in percent.
        #[pallet::constant]
        type DefaultPlatformFee: Get<u8>;

        /// Reputation a non-authority member needs to create a challenge.
        #[pallet::constant]
        type SponsorReputationFloor: Get<ReputationScore>;

        /// Reputation a member needs to verify progress.
        #[pallet::constant]
        type VerifierReputationFloor: Get<ReputationScore>;

        /// Cap on the reputation a member declares for themselves.
        #[pallet::constant]
        type MaxDeclaredReputation: Get<ReputationScore>;

        type WeightInfo: WeightInfo;
    }

    pub trait WeightInfo {
        fn initialize() -> Weight;
        fn register() -> Weight;
        fn update_settings() -> Weight;
        fn close_application() -> Weight;
        fn create_challenge() -> Weight;
        fn join_challenge() -> Weight;
        fn submit_progress() -> Weight;
        fn verify_progress() -> Weight;
        fn finalize_challenge() -> Weight;
        fn distribute_prizes() -> Weight;
        fn update_reputation() -> Weight;
    }

    pub struct DefaultWeightInfo;
    impl WeightInfo for DefaultWeightInfo {
        fn initialize() -> Weight { Weight::from_parts(20_000_000, 0) }
        fn register() -> Weight { Weight::from_parts(25_000_000, 0) }
        fn update_settings() -> Weight { Weight::from_parts(15_000_000, 0) }
        fn close_application() -> Weight { Weight::from_parts(15_000_000, 0) }
        fn create_challenge() -> Weight { Weight::from_parts(60_000_000, 0) }
        fn join_challenge() -> Weight { Weight::from_parts(50_000_000, 0) }
        fn submit_progress() -> Weight { Weight::from_parts(40_000_000, 0) }
        fn verify_progress() -> Weight { Weight::from_parts(50_000_000, 0) }
        fn finalize_challenge() -> Weight { Weight::from_parts(35_000_000, 0) }
        fn distribute_prizes() -> Weight { Weight::from_parts(60_000_000, 0) }
        fn update_reputation() -> Weight { Weight::from_parts(25_000_000, 0) }
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn integrity_test() {
            assert!(T::DefaultPlatformFee::get() <= 100, "platform fee is a percentage");
            assert!(
                T::MaxDeclaredReputation::get() < T::SponsorReputationFloor::get(),
                "declared reputation must not reach the sponsor floor"
            );
        }
    }

    // ================================================================
    // Storage
    // ================================================================

    #[pallet::storage]
    pub type App<T: Config> =
        StorageValue<_, AppInfo<T::AccountId, BlockNumberFor<T>>, OptionQuery>;

    #[pallet::storage]
    pub type PlatformFeePercent<T: Config> = StorageValue<_, u8, ValueQuery>;

    /// Id of the most recently created challenge. Zero before the first.
    #[pallet::storage]
    pub type LastChallengeId<T: Config> = StorageValue<_, EntityId, ValueQuery>;

    #[pallet::storage]
    pub type Challenges<T: Config> =
        StorageMap<_, Blake2_128Concat, EntityId, Challenge<T>, OptionQuery>;

    #[pallet::storage]
    pub type Members<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, Profile, OptionQuery>;

    #[pallet::storage]
    pub type Participants<T: Config> = StorageDoubleMap<
        _, Blake2_128Concat, EntityId, Blake2_128Concat, T::AccountId,
        Participation<BlockNumberFor<T>>, OptionQuery,
    >;

    /// (challenge, participant, verifier) → approved.
    #[pallet::storage]
    pub type ProgressVerifications<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Blake2_128Concat, EntityId>,
            NMapKey<Blake2_128Concat, T::AccountId>,
            NMapKey<Blake2_128Concat, T::AccountId>,
        ),
        bool,
        OptionQuery,
    >;

    #[pallet::storage]
    pub type ActiveChallenges<T: Config> = StorageValue<_, u32, ValueQuery>;

    #[pallet::storage]
    pub type TotalPrizePool<T: Config> = StorageValue<_, Balance, ValueQuery>;

    #[pallet::storage]
    pub type PlatformFeesCollected<T: Config> = StorageValue<_, Balance, ValueQuery>;

    // ================================================================
    // Events
    // ================================================================

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        Initialized { authority: T::AccountId, platform_fee_percent: u8 },
        Registered { who: T::AccountId, reputation: ReputationScore },
        ReputationUpdated { who: T::AccountId, old: ReputationScore, new: ReputationScore },
        SettingsUpdated { platform_fee_percent: u8 },
        ApplicationClosed,
        ChallengeCreated {
            challenge_id: EntityId,
            creator: T::AccountId,
            prize_pool: Balance,
            end: BlockNumberFor<T>,
        },
        ChallengeJoined { challenge_id: EntityId, who: T::AccountId, participants: u32 },
        ProgressSubmitted { challenge_id: EntityId, who: T::AccountId, score: u64, improved: bool },
        ProgressVerified {
            challenge_id: EntityId,
            target: T::AccountId,
            verifier: T::AccountId,
            approved: bool,
            verified_count: u32,
        },
        ChallengeFinalized { challenge_id: EntityId },
        PrizeDistributed {
            challenge_id: EntityId,
            winner: T::AccountId,
            gross: Balance,
            fee: Balance,
            net: Balance,
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
        /// Sender is not the application authority or challenge creator.
        NotAuthorized,
        NotRegistered,
        AlreadyRegistered,
        InsufficientReputation,
        ChallengeNotFound,
        ChallengeNotActive,
        /// The challenge's end round has passed.
        ChallengeEnded,
        /// The challenge's end round has not passed yet.
        ChallengeNotEnded,
        ChallengeNotFinalized,
        ChallengeFull,
        AlreadyJoined,
        NotParticipant,
        SelfVerification,
        AlreadyVerified,
        AlreadySettled,
        PrizeExceedsPool,
        InvalidFeeRate,
        InvalidCapacity,
        InvalidDuration,
        Overflow,
    }

    impl<T> Error<T> {
        pub fn class(&self) -> ErrorClass {
            match self {
                Error::NotAuthorized | Error::InsufficientReputation | Error::SelfVerification => {
                    ErrorClass::Authorization
                }
                Error::NotRegistered | Error::ChallengeNotFound | Error::NotParticipant => {
                    ErrorClass::NotFound
                }
                Error::NotInitialized
                | Error::AlreadyInitialized
                | Error::ApplicationClosed
                | Error::ChallengeNotActive
                | Error::ChallengeEnded
                | Error::ChallengeNotEnded
                | Error::ChallengeNotFinalized => ErrorClass::State,
                Error::AlreadyRegistered
                | Error::AlreadyJoined
                | Error::AlreadyVerified
                | Error::AlreadySettled => ErrorClass::DuplicateAction,
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
        /// Establish the caller as application authority.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::initialize())]
        pub fn initialize(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(!App::<T>::exists(), Error::<T>::AlreadyInitialized);

            let platform_fee_percent = T::DefaultPlatformFee::get();
            App::<T>::put(AppInfo {
                authority: who.clone(),
                status: AppStatus::Live,
                initialized_at: <frame_system::Pallet<T>>::block_number(),
            });
            PlatformFeePercent::<T>::put(platform_fee_percent);

            log::info!(target: LOG_TARGET, "challenges initialized");
            Self::deposit_event(Event::Initialized { authority: who, platform_fee_percent });
            Ok(())
        }

        /// Opt in with a self-declared reputation, capped at `MaxDeclaredReputation`.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::register())]
        pub fn register(origin: OriginFor<T>, reputation: ReputationScore) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            ensure!(!Members::<T>::contains_key(&who), Error::<T>::AlreadyRegistered);

            let reputation = reputation.min(T::MaxDeclaredReputation::get());
            Members::<T>::insert(&who, Profile { reputation, ..Default::default() });
            Self::deposit_event(Event::Registered { who, reputation });
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::update_settings())]
        pub fn update_settings(origin: OriginFor<T>, platform_fee_percent: u8) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;
            ensure!(platform_fee_percent <= 100, Error::<T>::InvalidFeeRate);

            PlatformFeePercent::<T>::put(platform_fee_percent);
            Self::deposit_event(Event::SettingsUpdated { platform_fee_percent });
            Ok(())
        }

        /// Stop accepting invocations. All state is kept.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::close_application())]
        pub fn close_application(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;

            app.status = AppStatus::Closed;
            App::<T>::put(app);
            log::info!(target: LOG_TARGET, "challenges closed");
            Self::deposit_event(Event::ApplicationClosed);
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::create_challenge())]
        pub fn create_challenge(
            origin: OriginFor<T>,
            title: BoundedTitle,
            description: BoundedDescription,
            challenge_type: BoundedCategory,
            prize_pool: Balance,
            min_reputation: ReputationScore,
            max_participants: u32,
            duration: BlockNumberFor<T>,
            sponsor: BoundedTitle,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let app = Self::ensure_live()?;
            Guard::AuthorityOrAtLeast {
                authority: &app.authority,
                standing: Members::<T>::get(&who).map(|m| m.reputation),
                floor: T::SponsorReputationFloor::get(),
            }
            .check(&who)
            .map_err(Error::<T>::from)?;
            ensure!(max_participants > 0, Error::<T>::InvalidCapacity);
            ensure!(!duration.is_zero(), Error::<T>::InvalidDuration);

            let now = <frame_system::Pallet<T>>::block_number();
            let window = Window::starting_at(now, duration).ok_or(Error::<T>::InvalidDuration)?;
            let challenge_id = next_id(LastChallengeId::<T>::get()).ok_or(Error::<T>::Overflow)?;
            let total_pool = TotalPrizePool::<T>::get()
                .checked_add(prize_pool)
                .ok_or(Error::<T>::Overflow)?;
            let active = ActiveChallenges::<T>::get().checked_add(1).ok_or(Error::<T>::Overflow)?;

            Challenges::<T>::insert(challenge_id, Challenge::<T> {
                creator: who.clone(),
                title,
                description,
                challenge_type,
                sponsor,
                prize_pool,
                min_reputation,
                max_participants,
                participants: 0,
                window,
                phase: Phase::Active,
                finalized_at: None,
                settlement: None,
            });
            LastChallengeId::<T>::put(challenge_id);
            TotalPrizePool::<T>::put(total_pool);
            ActiveChallenges::<T>::put(active);

            Self::deposit_event(Event::ChallengeCreated {
                challenge_id,
                creator: who,
                prize_pool,
                end: window.end,
            });
            Ok(())
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::join_challenge())]
        pub fn join_challenge(origin: OriginFor<T>, challenge_id: EntityId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            let mut member = Members::<T>::get(&who).ok_or(Error::<T>::NotRegistered)?;
            let mut challenge = Challenges::<T>::get(challenge_id).ok_or(Error::<T>::ChallengeNotFound)?;

            ensure!(challenge.phase == Phase::Active, Error::<T>::ChallengeNotActive);
            let now = <frame_system::Pallet<T>>::block_number();
            ensure!(challenge.window.is_open(now), Error::<T>::ChallengeEnded);
            ensure!(!Participants::<T>::contains_key(challenge_id, &who), Error::<T>::AlreadyJoined);
            ensure!(challenge.participants < challenge.max_participants, Error::<T>::ChallengeFull);
            Guard::AtLeast {
                standing: Some(member.reputation),
                floor: challenge.min_reputation,
            }
            .check(&who)
            .map_err(Error::<T>::from)?;

            challenge.participants = challenge.participants.checked_add(1).ok_or(Error::<T>::Overflow)?;
            member.challenges_joined = member.challenges_joined.saturating_add(1);

            Participants::<T>::insert(challenge_id, &who, Participation {
                score: 0,
                evidence: BoundedEvidence::default(),
                verified_count: 0,
                joined_at: now,
                last_update: now,
            });
            let participants = challenge.participants;
            Challenges::<T>::insert(challenge_id, challenge);
            Members::<T>::insert(&who, member);

            Self::deposit_event(Event::ChallengeJoined { challenge_id, who, participants });
            Ok(())
        }

        /// Report a score. Kept only if it beats the participant's best.
        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::submit_progress())]
        pub fn submit_progress(
            origin: OriginFor<T>,
            challenge_id: EntityId,
            score: u64,
            evidence: BoundedEvidence,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            let challenge = Challenges::<T>::get(challenge_id).ok_or(Error::<T>::ChallengeNotFound)?;
            let mut participation =
                Participants::<T>::get(challenge_id, &who).ok_or(Error::<T>::NotParticipant)?;

            ensure!(challenge.phase == Phase::Active, Error::<T>::ChallengeNotActive);
            let now = <frame_system::Pallet<T>>::block_number();
            ensure!(!challenge.window.has_elapsed(now), Error::<T>::ChallengeEnded);

            let improved = score > participation.score;
            if improved {
                participation.score = score;
                participation.evidence = evidence;
                participation.last_update = now;
                Participants::<T>::insert(challenge_id, &who, participation);
            }

            Self::deposit_event(Event::ProgressSubmitted { challenge_id, who, score, improved });
            Ok(())
        }

        /// Approve or reject another participant's progress.
        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::verify_progress())]
        pub fn verify_progress(
            origin: OriginFor<T>,
            challenge_id: EntityId,
            target: T::AccountId,
            approve: bool,
        ) -> DispatchResult {
            let verifier = ensure_signed(origin)?;
            Self::ensure_live()?;
            Guard::AtLeast {
                standing: Members::<T>::get(&verifier).map(|m| m.reputation),
                floor: T::VerifierReputationFloor::get(),
            }
            .check(&verifier)
            .map_err(Error::<T>::from)?;

            let challenge = Challenges::<T>::get(challenge_id).ok_or(Error::<T>::ChallengeNotFound)?;
            ensure!(challenge.phase == Phase::Active, Error::<T>::ChallengeNotActive);
            let mut participation =
                Participants::<T>::get(challenge_id, &target).ok_or(Error::<T>::NotParticipant)?;
            ensure!(verifier != target, Error::<T>::SelfVerification);
            ensure!(
                !ProgressVerifications::<T>::contains_key((challenge_id, &target, &verifier)),
                Error::<T>::AlreadyVerified
            );

            if approve {
                let tally = ConsensusPolicy::progress_approval()
                    .contribute(participation.verified_count.into(), &Contribution::default())
                    .ok_or(Error::<T>::Overflow)?;
                participation.verified_count =
                    u32::try_from(tally.total).map_err(|_| Error::<T>::Overflow)?;
                Participants::<T>::insert(challenge_id, &target, &participation);
            }
            ProgressVerifications::<T>::insert((challenge_id, &target, &verifier), approve);

            Self::deposit_event(Event::ProgressVerified {
                challenge_id,
                target,
                verifier,
                approved: approve,
                verified_count: participation.verified_count,
            });
            Ok(())
        }

        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::finalize_challenge())]
        pub fn finalize_challenge(origin: OriginFor<T>, challenge_id: EntityId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let app = Self::ensure_live()?;
            let mut challenge = Challenges::<T>::get(challenge_id).ok_or(Error::<T>::ChallengeNotFound)?;
            Guard::AuthorityOrCreator { authority: &app.authority, creator: &challenge.creator }
                .check(&who)
                .map_err(Error::<T>::from)?;

            let now = <frame_system::Pallet<T>>::block_number();
            ensure!(challenge.window.has_elapsed(now), Error::<T>::ChallengeNotEnded);
            challenge
                .phase
                .transition(Phase::Finalized)
                .map_err(|_| Error::<T>::ChallengeNotActive)?;
            challenge.finalized_at = Some(now);

            let active = ActiveChallenges::<T>::get().checked_sub(1).ok_or(Error::<T>::Overflow)?;
            ActiveChallenges::<T>::put(active);
            Challenges::<T>::insert(challenge_id, challenge);

            log::debug!(target: LOG_TARGET, "challenge {} finalized at {:?}", challenge_id, now);
            Self::deposit_event(Event::ChallengeFinalized { challenge_id });
            Ok(())
        }

        /// Settle a finalized challenge. `amount` is the gross payout before fees.
        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::distribute_prizes())]
        pub fn distribute_prizes(
            origin: OriginFor<T>,
            challenge_id: EntityId,
            winner: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;

            let mut challenge = Challenges::<T>::get(challenge_id).ok_or(Error::<T>::ChallengeNotFound)?;
            ensure!(challenge.phase == Phase::Finalized, Error::<T>::ChallengeNotFinalized);
            ensure!(challenge.settlement.is_none(), Error::<T>::AlreadySettled);
            ensure!(amount <= challenge.prize_pool, Error::<T>::PrizeExceedsPool);
            ensure!(Participants::<T>::contains_key(challenge_id, &winner), Error::<T>::NotParticipant);
            let mut member = Members::<T>::get(&winner).ok_or(Error::<T>::NotRegistered)?;

            let split = FeeSplit::compute(amount, PlatformFeePercent::<T>::get())
                .ok_or(Error::<T>::InvalidFeeRate)?;
            member.total_winnings = member.total_winnings.checked_add(split.net).ok_or(Error::<T>::Overflow)?;
            let pool = TotalPrizePool::<T>::get()
                .checked_sub(challenge.prize_pool)
                .ok_or(Error::<T>::Overflow)?;
            let fees = PlatformFeesCollected::<T>::get()
                .checked_add(split.fee)
                .ok_or(Error::<T>::Overflow)?;

            challenge.settlement = Some(Settlement {
                winner: winner.clone(),
                gross: amount,
                fee: split.fee,
                net: split.net,
            });
            Challenges::<T>::insert(challenge_id, challenge);
            Members::<T>::insert(&winner, member);
            TotalPrizePool::<T>::put(pool);
            PlatformFeesCollected::<T>::put(fees);

            log::debug!(
                target: LOG_TARGET,
                "challenge {} settled: gross {} fee {} net {}",
                challenge_id, amount, split.fee, split.net,
            );
            Self::deposit_event(Event::PrizeDistributed {
                challenge_id,
                winner,
                gross: amount,
                fee: split.fee,
                net: split.net,
            });
            Ok(())
        }

        /// Authority-only: set a member's reputation, including above the declared cap.
        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::update_reputation())]
        pub fn update_reputation(
            origin: OriginFor<T>,
            target: T::AccountId,
            reputation: ReputationScore,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;

            let old = Members::<T>::try_mutate(&target, |maybe_member| {
                let member = maybe_member.as_mut().ok_or(Error::<T>::NotRegistered)?;
                Ok::<_, Error<T>>(core::mem::replace(&mut member.reputation, reputation))
            })?;

            log::debug!(target: LOG_TARGET, "member reputation set {} -> {}", old, reputation);
            Self::deposit_event(Event::ReputationUpdated { who: target, old, new: reputation });
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
    }
}
