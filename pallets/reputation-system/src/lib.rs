//! # Reputation System Pallet
//!
//! Player reputation and skill economy backed by two fixed-supply credits:
//! **REP** mirrors reputation points and **SKILL** mirrors skill points, each
//! at 1000 base units per point.
//!
//! ## Sources of points
//! | Operation            | Caller     | Reputation          | Skill points      |
//! |----------------------|------------|---------------------|-------------------|
//! | `register`           | player     | 1000                | 0                 |
//! | `update_skill`       | player     |                     | 10 × rating gain  |
//! | `endorse_player`     | player     | 5 × (endorser / 100)|                   |
//! | `verify_achievement` | authority  | 100 × rarity        | 100 × rarity      |
//! | `professional_scout` | authority  | 500 × interest      |                   |
//!
//! `transfer_reputation` moves points and the matching REP between players.
//! The pallet account issues both credits on initialization and keeps the
//! sole right to move or freeze them; every award is paid from its reserve,
//! so an exhausted reserve rejects the award.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[cfg(test)]
mod mock;

const LOG_TARGET: &str = "runtime::reputation";

#[frame_support::pallet]
pub mod pallet {
    use super::LOG_TARGET;
    use frame_support::{pallet_prelude::*, PalletId};
    use frame_system::pallet_prelude::*;
    use sp_runtime::traits::AccountIdConversion;
    use sportwarren_primitives::*;

    // ================================================================
    // Types
    // ================================================================

    #[derive(Clone, PartialEq, Eq, Default, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct PlayerProfile {
        pub reputation: ReputationScore,
        pub skill_points: ReputationScore,
        /// Achievements verified by the authority.
        pub verification_count: u32,
        pub endorsement_count: u32,
        pub professional_score: ReputationScore,
        /// Set once `verification_count` reaches the verification threshold.
        pub verified: bool,
    }

    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct SkillRecord<AccountId, BlockNumber> {
        /// Best rating reported so far, 0..=100.
        pub rating: u8,
        pub verifier: AccountId,
        pub evidence: BoundedEvidence,
        pub updated_at: BlockNumber,
    }

    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct Endorsement {
        pub category: BoundedCategory,
        pub rating: u8,
        pub comment: BoundedDescription,
        /// Reputation the target received.
        pub bonus: ReputationScore,
    }

    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct Achievement<BlockNumber> {
        pub rarity: u8,
        pub points: ReputationScore,
        pub evidence: BoundedEvidence,
        pub verified_at: BlockNumber,
    }

    #[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct ScoutReport {
        pub interest: u8,
        pub notes: BoundedDescription,
        pub bonus: ReputationScore,
    }

    /// Credits issued by this application.
    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct Tokens {
        pub rep: AssetId,
        pub skill: AssetId,
    }

    // ================================================================
    // Config
    // ================================================================

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Credit ledger for REP and SKILL.
        type Credits: CreditLedger<Self::AccountId>;

        /// Account that issues REP and SKILL and holds their reserves.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        #[pallet::constant]
        type StartingReputation: Get<ReputationScore>;

        /// Achievements a player needs verified before being marked verified.
        #[pallet::constant]
        type DefaultVerificationThreshold: Get<u32>;

        type WeightInfo: WeightInfo;
    }

    pub trait WeightInfo {
        fn initialize() -> Weight;
        fn register() -> Weight;
        fn update_settings() -> Weight;
        fn close_application() -> Weight;
        fn update_skill() -> Weight;
        fn endorse_player() -> Weight;
        fn verify_achievement() -> Weight;
        fn professional_scout() -> Weight;
        fn transfer_reputation() -> Weight;
        fn set_frozen() -> Weight;
    }

    pub struct DefaultWeightInfo;
    impl WeightInfo for DefaultWeightInfo {
        fn initialize() -> Weight { Weight::from_parts(80_000_000, 0) }
        fn register() -> Weight { Weight::from_parts(60_000_000, 0) }
        fn update_settings() -> Weight { Weight::from_parts(15_000_000, 0) }
        fn close_application() -> Weight { Weight::from_parts(15_000_000, 0) }
        fn update_skill() -> Weight { Weight::from_parts(70_000_000, 0) }
        fn endorse_player() -> Weight { Weight::from_parts(80_000_000, 0) }
        fn verify_achievement() -> Weight { Weight::from_parts(90_000_000, 0) }
        fn professional_scout() -> Weight { Weight::from_parts(70_000_000, 0) }
        fn transfer_reputation() -> Weight { Weight::from_parts(70_000_000, 0) }
        fn set_frozen() -> Weight { Weight::from_parts(40_000_000, 0) }
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    // ================================================================
    // Storage
    // ================================================================

    #[pallet::storage]
    pub type App<T: Config> =
        StorageValue<_, AppInfo<T::AccountId, BlockNumberFor<T>>, OptionQuery>;

    #[pallet::storage]
    pub type IssuedTokens<T: Config> = StorageValue<_, Tokens, OptionQuery>;

    #[pallet::storage]
    pub type VerificationThreshold<T: Config> = StorageValue<_, u32, ValueQuery>;

    #[pallet::storage]
    pub type TotalPlayers<T: Config> = StorageValue<_, u32, ValueQuery>;

    #[pallet::storage]
    pub type Players<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, PlayerProfile, OptionQuery>;

    #[pallet::storage]
    pub type Skills<T: Config> = StorageDoubleMap<
        _, Blake2_128Concat, T::AccountId, Blake2_128Concat, BoundedCategory,
        SkillRecord<T::AccountId, BlockNumberFor<T>>, OptionQuery,
    >;

    /// (target, endorser) → endorsement. One per pair, whatever the category.
    #[pallet::storage]
    pub type Endorsements<T: Config> = StorageDoubleMap<
        _, Blake2_128Concat, T::AccountId, Blake2_128Concat, T::AccountId,
        Endorsement, OptionQuery,
    >;

    #[pallet::storage]
    pub type Achievements<T: Config> = StorageDoubleMap<
        _, Blake2_128Concat, T::AccountId, Twox64Concat, u32,
        Achievement<BlockNumberFor<T>>, OptionQuery,
    >;

    /// (player, organization) → report.
    #[pallet::storage]
    pub type ScoutReports<T: Config> = StorageDoubleMap<
        _, Blake2_128Concat, T::AccountId, Blake2_128Concat, BoundedTitle,
        ScoutReport, OptionQuery,
    >;

    // ================================================================
    // Events
    // ================================================================

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        Initialized { authority: T::AccountId, rep_asset: AssetId, skill_asset: AssetId },
        Registered { who: T::AccountId, reputation: ReputationScore },
        SettingsUpdated { verification_threshold: u32 },
        ApplicationClosed,
        SkillUpdated { who: T::AccountId, category: BoundedCategory, rating: u8, points: ReputationScore },
        PlayerEndorsed {
            target: T::AccountId,
            endorser: T::AccountId,
            category: BoundedCategory,
            bonus: ReputationScore,
        },
        AchievementVerified { player: T::AccountId, achievement_id: u32, points: ReputationScore },
        PlayerVerified { player: T::AccountId },
        PlayerScouted { player: T::AccountId, organization: BoundedTitle, bonus: ReputationScore },
        ReputationTransferred { from: T::AccountId, to: T::AccountId, amount: ReputationScore },
        FreezeSet { player: T::AccountId, frozen: bool },
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
        SelfEndorsement,
        SelfVerification,
        SelfTransfer,
        AlreadyEndorsed,
        AlreadyAchieved,
        AlreadyScouted,
        /// Rating outside 0..=100.
        InvalidRating,
        /// Rarity outside 1..=4.
        InvalidRarity,
        /// Interest outside 1..=3.
        InvalidInterest,
        InvalidSettings,
        /// Transfer exceeds the sender's reputation.
        InsufficientBalance,
        ZeroAmount,
        Overflow,
    }

    impl<T> Error<T> {
        pub fn class(&self) -> ErrorClass {
            match self {
                Error::NotAuthorized
                | Error::InsufficientReputation
                | Error::SelfEndorsement
                | Error::SelfVerification
                | Error::SelfTransfer => ErrorClass::Authorization,
                Error::NotRegistered => ErrorClass::NotFound,
                Error::NotInitialized | Error::AlreadyInitialized | Error::ApplicationClosed => {
                    ErrorClass::State
                }
                Error::AlreadyRegistered
                | Error::AlreadyEndorsed
                | Error::AlreadyAchieved
                | Error::AlreadyScouted => ErrorClass::DuplicateAction,
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
        /// Establish the authority and issue REP and SKILL.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::initialize())]
        pub fn initialize(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(!App::<T>::exists(), Error::<T>::AlreadyInitialized);

            let issuer = Self::account_id();
            let rep = T::Credits::issue(&issuer, Self::asset_spec(b"Reputation Token", b"REP"))?;
            let skill = T::Credits::issue(&issuer, Self::asset_spec(b"Skill Token", b"SKILL"))?;

            App::<T>::put(AppInfo {
                authority: who.clone(),
                status: AppStatus::Live,
                initialized_at: <frame_system::Pallet<T>>::block_number(),
            });
            IssuedTokens::<T>::put(Tokens { rep, skill });
            VerificationThreshold::<T>::put(T::DefaultVerificationThreshold::get());

            log::info!(target: LOG_TARGET, "reputation system initialized, REP {} SKILL {}", rep, skill);
            Self::deposit_event(Event::Initialized { authority: who, rep_asset: rep, skill_asset: skill });
            Ok(())
        }

        /// Opt in: starting reputation plus the matching REP allocation.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::register())]
        pub fn register(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            ensure!(!Players::<T>::contains_key(&who), Error::<T>::AlreadyRegistered);

            let reputation = T::StartingReputation::get();
            let tokens = Self::tokens()?;
            T::Credits::distribute(tokens.rep, &Self::account_id(), &who, Self::token_units(reputation)?)?;
            let total = TotalPlayers::<T>::get().checked_add(1).ok_or(Error::<T>::Overflow)?;

            Players::<T>::insert(&who, PlayerProfile { reputation, ..Default::default() });
            TotalPlayers::<T>::put(total);
            Self::deposit_event(Event::Registered { who, reputation });
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::update_settings())]
        pub fn update_settings(origin: OriginFor<T>, verification_threshold: u32) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;
            ensure!(verification_threshold > 0, Error::<T>::InvalidSettings);

            VerificationThreshold::<T>::put(verification_threshold);
            Self::deposit_event(Event::SettingsUpdated { verification_threshold });
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
            log::info!(target: LOG_TARGET, "reputation system closed");
            Self::deposit_event(Event::ApplicationClosed);
            Ok(())
        }

        /// Report a skill rating vouched for by another player.
        ///
        /// Skill points and SKILL are awarded only for the gain over the best
        /// rating previously recorded in the category.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::update_skill())]
        pub fn update_skill(
            origin: OriginFor<T>,
            category: BoundedCategory,
            rating: u8,
            verifier: T::AccountId,
            evidence: BoundedEvidence,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            let mut profile = Players::<T>::get(&who).ok_or(Error::<T>::NotRegistered)?;
            ensure!(rating <= MAX_RATING, Error::<T>::InvalidRating);
            ensure!(verifier != who, Error::<T>::SelfVerification);
            ensure!(Players::<T>::contains_key(&verifier), Error::<T>::NotRegistered);

            let previous = Skills::<T>::get(&who, &category).map(|s| s.rating).unwrap_or(0);
            let gain = rating.saturating_sub(previous);
            let points = ReputationScore::from(gain)
                .checked_mul(SKILL_POINTS_PER_RATING)
                .ok_or(Error::<T>::Overflow)?;

            if gain > 0 || !Skills::<T>::contains_key(&who, &category) {
                Skills::<T>::insert(&who, &category, SkillRecord {
                    rating,
                    verifier,
                    evidence,
                    updated_at: <frame_system::Pallet<T>>::block_number(),
                });
            }
            if points > 0 {
                profile.skill_points = profile.skill_points.checked_add(points).ok_or(Error::<T>::Overflow)?;
                let tokens = Self::tokens()?;
                T::Credits::distribute(tokens.skill, &Self::account_id(), &who, Self::token_units(points)?)?;
                Players::<T>::insert(&who, profile);
            }

            Self::deposit_event(Event::SkillUpdated { who, category, rating, points });
            Ok(())
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::endorse_player())]
        pub fn endorse_player(
            origin: OriginFor<T>,
            target: T::AccountId,
            category: BoundedCategory,
            rating: u8,
            comment: BoundedDescription,
        ) -> DispatchResult {
            let endorser = ensure_signed(origin)?;
            Self::ensure_live()?;
            ensure!(endorser != target, Error::<T>::SelfEndorsement);
            let standing = Players::<T>::get(&endorser).map(|p| p.reputation);
            Guard::AtLeast { standing, floor: ENDORSER_REPUTATION_FLOOR }
                .check(&endorser)
                .map_err(Error::<T>::from)?;
            let endorser_reputation = standing.unwrap_or_default();
            let mut profile = Players::<T>::get(&target).ok_or(Error::<T>::NotRegistered)?;
            ensure!(rating <= MAX_RATING, Error::<T>::InvalidRating);
            ensure!(!Endorsements::<T>::contains_key(&target, &endorser), Error::<T>::AlreadyEndorsed);

            let weight = endorser_reputation / ENDORSEMENT_WEIGHT_DIVISOR;
            let bonus = weight.checked_mul(ENDORSEMENT_BONUS_MULTIPLIER).ok_or(Error::<T>::Overflow)?;
            profile.endorsement_count = profile.endorsement_count.saturating_add(1);
            profile.reputation = profile.reputation.checked_add(bonus).ok_or(Error::<T>::Overflow)?;

            let tokens = Self::tokens()?;
            T::Credits::distribute(tokens.rep, &Self::account_id(), &target, Self::token_units(bonus)?)?;
            Endorsements::<T>::insert(
                &target,
                &endorser,
                Endorsement { category: category.clone(), rating, comment, bonus },
            );
            Players::<T>::insert(&target, profile);

            Self::deposit_event(Event::PlayerEndorsed { target, endorser, category, bonus });
            Ok(())
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::verify_achievement())]
        pub fn verify_achievement(
            origin: OriginFor<T>,
            player: T::AccountId,
            achievement_id: u32,
            rarity: u8,
            evidence: BoundedEvidence,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;
            let mut profile = Players::<T>::get(&player).ok_or(Error::<T>::NotRegistered)?;
            ensure!((1..=MAX_ACHIEVEMENT_RARITY).contains(&rarity), Error::<T>::InvalidRarity);
            ensure!(!Achievements::<T>::contains_key(&player, achievement_id), Error::<T>::AlreadyAchieved);

            let points = ACHIEVEMENT_POINTS_PER_RARITY * ReputationScore::from(rarity);
            profile.reputation = profile.reputation.checked_add(points).ok_or(Error::<T>::Overflow)?;
            profile.skill_points = profile.skill_points.checked_add(points).ok_or(Error::<T>::Overflow)?;
            profile.verification_count = profile.verification_count.saturating_add(1);
            let newly_verified =
                !profile.verified && profile.verification_count >= VerificationThreshold::<T>::get();
            if newly_verified {
                profile.verified = true;
            }

            let tokens = Self::tokens()?;
            let units = Self::token_units(points)?;
            T::Credits::distribute(tokens.rep, &Self::account_id(), &player, units)?;
            T::Credits::distribute(tokens.skill, &Self::account_id(), &player, units)?;
            Achievements::<T>::insert(&player, achievement_id, Achievement {
                rarity,
                points,
                evidence,
                verified_at: <frame_system::Pallet<T>>::block_number(),
            });
            Players::<T>::insert(&player, profile);

            Self::deposit_event(Event::AchievementVerified { player: player.clone(), achievement_id, points });
            if newly_verified {
                Self::deposit_event(Event::PlayerVerified { player });
            }
            Ok(())
        }

        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::professional_scout())]
        pub fn professional_scout(
            origin: OriginFor<T>,
            player: T::AccountId,
            organization: BoundedTitle,
            interest: u8,
            notes: BoundedDescription,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;
            let mut profile = Players::<T>::get(&player).ok_or(Error::<T>::NotRegistered)?;
            ensure!((1..=MAX_SCOUT_INTEREST).contains(&interest), Error::<T>::InvalidInterest);
            ensure!(!ScoutReports::<T>::contains_key(&player, &organization), Error::<T>::AlreadyScouted);

            let bonus = SCOUT_BONUS_PER_INTEREST * ReputationScore::from(interest);
            profile.professional_score =
                profile.professional_score.checked_add(bonus).ok_or(Error::<T>::Overflow)?;
            profile.reputation = profile.reputation.checked_add(bonus).ok_or(Error::<T>::Overflow)?;

            let tokens = Self::tokens()?;
            T::Credits::distribute(tokens.rep, &Self::account_id(), &player, Self::token_units(bonus)?)?;
            ScoutReports::<T>::insert(&player, &organization, ScoutReport { interest, notes, bonus });
            Players::<T>::insert(&player, profile);

            Self::deposit_event(Event::PlayerScouted { player, organization, bonus });
            Ok(())
        }

        /// Move reputation, and the matching REP, to another player.
        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::transfer_reputation())]
        pub fn transfer_reputation(
            origin: OriginFor<T>,
            recipient: T::AccountId,
            amount: ReputationScore,
        ) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::ensure_live()?;
            ensure!(sender != recipient, Error::<T>::SelfTransfer);
            ensure!(amount > 0, Error::<T>::ZeroAmount);
            let mut from = Players::<T>::get(&sender).ok_or(Error::<T>::NotRegistered)?;
            let mut to = Players::<T>::get(&recipient).ok_or(Error::<T>::NotRegistered)?;
            ensure!(from.reputation >= amount, Error::<T>::InsufficientBalance);

            from.reputation -= amount;
            to.reputation = to.reputation.checked_add(amount).ok_or(Error::<T>::Overflow)?;
            let tokens = Self::tokens()?;
            T::Credits::force_transfer(
                tokens.rep,
                &Self::account_id(),
                &sender,
                &recipient,
                Self::token_units(amount)?,
            )?;
            Players::<T>::insert(&sender, from);
            Players::<T>::insert(&recipient, to);

            log::debug!(target: LOG_TARGET, "reputation transfer of {}", amount);
            Self::deposit_event(Event::ReputationTransferred { from: sender, to: recipient, amount });
            Ok(())
        }

        /// Freeze or thaw a player's REP and SKILL.
        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::set_frozen())]
        pub fn set_frozen(origin: OriginFor<T>, player: T::AccountId, frozen: bool) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;
            ensure!(Players::<T>::contains_key(&player), Error::<T>::NotRegistered);

            let tokens = Self::tokens()?;
            let issuer = Self::account_id();
            T::Credits::set_frozen(tokens.rep, &issuer, &player, frozen)?;
            T::Credits::set_frozen(tokens.skill, &issuer, &player, frozen)?;

            Self::deposit_event(Event::FreezeSet { player, frozen });
            Ok(())
        }
    }

    // ================================================================
    // Internal helpers
    // ================================================================

    impl<T: Config> Pallet<T> {
        /// Issuer of REP and SKILL.
        pub fn account_id() -> T::AccountId {
            T::PalletId::get().into_account_truncating()
        }

        fn ensure_live() -> Result<AppInfo<T::AccountId, BlockNumberFor<T>>, Error<T>> {
            let app = App::<T>::get().ok_or(Error::<T>::NotInitialized)?;
            ensure!(app.status == AppStatus::Live, Error::<T>::ApplicationClosed);
            Ok(app)
        }

        fn tokens() -> Result<Tokens, Error<T>> {
            IssuedTokens::<T>::get().ok_or(Error::<T>::NotInitialized)
        }

        fn token_units(points: ReputationScore) -> Result<Balance, Error<T>> {
            Balance::from(points).checked_mul(TOKEN_UNITS_PER_POINT).ok_or(Error::<T>::Overflow)
        }

        fn asset_spec(name: &[u8], unit: &[u8]) -> AssetSpec {
            AssetSpec {
                name: BoundedAssetName::truncate_from(name.to_vec()),
                unit: BoundedAssetUnit::truncate_from(unit.to_vec()),
                total_supply: REPUTATION_TOKEN_SUPPLY,
                decimals: REPUTATION_TOKEN_DECIMALS,
            }
        }
    }
}
