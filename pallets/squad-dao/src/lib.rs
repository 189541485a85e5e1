//! # Squad DAO Pallet
//!
//! Squad governance weighted by holdings of the SDAO credit.
//!
//! Registration hands each new member a fixed SDAO allocation from the
//! pallet reserve. Voting power is the member's SDAO balance at the moment
//! the vote is cast, read from the credit ledger, so a member whose balance
//! has been drained can neither propose nor vote.
//!
//! A proposal accepts votes from `start` to `end` inclusive. Once `end` has
//! passed it can be executed exactly once, and only if the weight in favour
//! is strictly greater than the weight against.
//!
//! Members move SDAO among themselves with `transfer_stake`; the pallet
//! account stays the only party able to move it.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[cfg(test)]
mod mock;

const LOG_TARGET: &str = "runtime::squad-dao";

#[frame_support::pallet]
pub mod pallet {
    use super::LOG_TARGET;
    use frame_support::{pallet_prelude::*, PalletId};
    use frame_system::pallet_prelude::*;
    use sp_runtime::traits::AccountIdConversion;
    use sportwarren_primitives::{
        consensus::{majority, ConsensusPolicy, Contribution},
        *,
    };

    // ================================================================
    // Types
    // ================================================================

    #[derive(Clone, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    #[scale_info(skip_type_params(T))]
    pub struct Proposal<T: Config> {
        pub proposer: T::AccountId,
        pub description: BoundedDescription,
        pub window: Window<BlockNumberFor<T>>,
        pub votes_for: ConsensusWeight,
        pub votes_against: ConsensusWeight,
        pub voter_count: u32,
        pub phase: Phase,
        pub executed: bool,
        pub created_at: BlockNumberFor<T>,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, Debug)]
    pub struct Ballot {
        pub aye: bool,
        pub weight: ConsensusWeight,
    }

    // ================================================================
    // Config
    // ================================================================

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        type Credits: CreditLedger<Self::AccountId>;

        /// Account that issues SDAO and holds the unallocated supply.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        #[pallet::constant]
        type TotalSupply: Get<Balance>;

        /// SDAO handed to each member on registration.
        #[pallet::constant]
        type MemberAllocation: Get<Balance>;

        type WeightInfo: WeightInfo;
    }

    pub trait WeightInfo {
        fn initialize() -> Weight;
        fn register() -> Weight;
        fn close_application() -> Weight;
        fn create_proposal() -> Weight;
        fn vote() -> Weight;
        fn execute_proposal() -> Weight;
        fn transfer_stake() -> Weight;
    }

    pub struct DefaultWeightInfo;
    impl WeightInfo for DefaultWeightInfo {
        fn initialize() -> Weight { Weight::from_parts(60_000_000, 0) }
        fn register() -> Weight { Weight::from_parts(50_000_000, 0) }
        fn close_application() -> Weight { Weight::from_parts(15_000_000, 0) }
        fn create_proposal() -> Weight { Weight::from_parts(50_000_000, 0) }
        fn vote() -> Weight { Weight::from_parts(60_000_000, 0) }
        fn execute_proposal() -> Weight { Weight::from_parts(40_000_000, 0) }
        fn transfer_stake() -> Weight { Weight::from_parts(50_000_000, 0) }
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn integrity_test() {
            assert!(T::MemberAllocation::get() > 0, "members must receive voting power");
            assert!(
                T::MemberAllocation::get() <= T::TotalSupply::get(),
                "allocation cannot exceed supply"
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
    pub type SdaoAsset<T: Config> = StorageValue<_, AssetId, OptionQuery>;

    /// Member → block of registration.
    #[pallet::storage]
    pub type Members<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, BlockNumberFor<T>, OptionQuery>;

    #[pallet::storage]
    pub type MemberCount<T: Config> = StorageValue<_, u32, ValueQuery>;

    #[pallet::storage]
    pub type LastProposalId<T: Config> = StorageValue<_, EntityId, ValueQuery>;

    #[pallet::storage]
    pub type Proposals<T: Config> =
        StorageMap<_, Blake2_128Concat, EntityId, Proposal<T>, OptionQuery>;

    #[pallet::storage]
    pub type Votes<T: Config> = StorageDoubleMap<
        _, Blake2_128Concat, EntityId, Blake2_128Concat, T::AccountId,
        Ballot, OptionQuery,
    >;

    // ================================================================
    // Events
    // ================================================================

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        Initialized { authority: T::AccountId, asset_id: AssetId },
        MemberRegistered { who: T::AccountId, allocation: Balance },
        ApplicationClosed,
        ProposalCreated {
            proposal_id: EntityId,
            proposer: T::AccountId,
            start: BlockNumberFor<T>,
            end: BlockNumberFor<T>,
        },
        Voted { proposal_id: EntityId, voter: T::AccountId, aye: bool, weight: ConsensusWeight },
        ProposalExecuted { proposal_id: EntityId, votes_for: ConsensusWeight, votes_against: ConsensusWeight },
        StakeTransferred { from: T::AccountId, to: T::AccountId, amount: Balance },
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
        NotMember,
        AlreadyMember,
        /// Member holds no SDAO.
        NoVotingPower,
        ProposalNotFound,
        /// `end` precedes `start`.
        InvalidWindow,
        ProposalNotActive,
        /// Outside the proposal's voting window.
        VotingClosed,
        VotingNotEnded,
        AlreadyVoted,
        AlreadyExecuted,
        /// Weight in favour does not exceed weight against.
        MajorityNotReached,
        /// Sender and recipient are the same member.
        SelfTransfer,
        ZeroAmount,
        Overflow,
    }

    impl<T> Error<T> {
        pub fn class(&self) -> ErrorClass {
            match self {
                Error::NotAuthorized | Error::NoVotingPower | Error::SelfTransfer => {
                    ErrorClass::Authorization
                }
                Error::NotMember | Error::ProposalNotFound => ErrorClass::NotFound,
                Error::NotInitialized
                | Error::AlreadyInitialized
                | Error::ApplicationClosed
                | Error::ProposalNotActive
                | Error::VotingClosed
                | Error::VotingNotEnded
                | Error::MajorityNotReached => ErrorClass::State,
                Error::AlreadyMember | Error::AlreadyVoted | Error::AlreadyExecuted => {
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
                Denial::Unregistered => Error::NotMember,
                Denial::BelowFloor => Error::NoVotingPower,
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

            let asset_id = T::Credits::issue(&Self::account_id(), AssetSpec {
                name: BoundedAssetName::truncate_from(b"Squad DAO Token".to_vec()),
                unit: BoundedAssetUnit::truncate_from(b"SDAO".to_vec()),
                total_supply: T::TotalSupply::get(),
                decimals: SDAO_DECIMALS,
            })?;

            App::<T>::put(AppInfo {
                authority: who.clone(),
                status: AppStatus::Live,
                initialized_at: <frame_system::Pallet<T>>::block_number(),
            });
            SdaoAsset::<T>::put(asset_id);

            log::info!(target: LOG_TARGET, "squad dao initialized with SDAO asset {}", asset_id);
            Self::deposit_event(Event::Initialized { authority: who, asset_id });
            Ok(())
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::register())]
        pub fn register(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            ensure!(!Members::<T>::contains_key(&who), Error::<T>::AlreadyMember);

            let allocation = T::MemberAllocation::get();
            T::Credits::distribute(Self::asset()?, &Self::account_id(), &who, allocation)?;
            let count = MemberCount::<T>::get().checked_add(1).ok_or(Error::<T>::Overflow)?;

            Members::<T>::insert(&who, <frame_system::Pallet<T>>::block_number());
            MemberCount::<T>::put(count);
            Self::deposit_event(Event::MemberRegistered { who, allocation });
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::close_application())]
        pub fn close_application(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut app = Self::ensure_live()?;
            Guard::Authority(&app.authority).check(&who).map_err(Error::<T>::from)?;

            app.status = AppStatus::Closed;
            App::<T>::put(app);
            log::info!(target: LOG_TARGET, "squad dao closed");
            Self::deposit_event(Event::ApplicationClosed);
            Ok(())
        }

        /// Open a proposal voted on from `start` to `end`, both inclusive.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::create_proposal())]
        pub fn create_proposal(
            origin: OriginFor<T>,
            description: BoundedDescription,
            start: BlockNumberFor<T>,
            end: BlockNumberFor<T>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            Self::voting_power(&who)?;
            let window = Window::new(start, end).ok_or(Error::<T>::InvalidWindow)?;
            let proposal_id = next_id(LastProposalId::<T>::get()).ok_or(Error::<T>::Overflow)?;

            Proposals::<T>::insert(proposal_id, Proposal {
                proposer: who.clone(),
                description,
                window,
                votes_for: 0,
                votes_against: 0,
                voter_count: 0,
                phase: Phase::Active,
                executed: false,
                created_at: <frame_system::Pallet<T>>::block_number(),
            });
            LastProposalId::<T>::put(proposal_id);

            Self::deposit_event(Event::ProposalCreated { proposal_id, proposer: who, start, end });
            Ok(())
        }

        /// Cast the caller's full SDAO balance for or against a proposal.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::vote())]
        pub fn vote(origin: OriginFor<T>, proposal_id: EntityId, aye: bool) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            let stake = Self::voting_power(&who)?;

            let mut proposal = Proposals::<T>::get(proposal_id).ok_or(Error::<T>::ProposalNotFound)?;
            ensure!(proposal.phase == Phase::Active, Error::<T>::ProposalNotActive);
            let now = <frame_system::Pallet<T>>::block_number();
            ensure!(proposal.window.is_open(now), Error::<T>::VotingClosed);
            ensure!(!Votes::<T>::contains_key(proposal_id, &who), Error::<T>::AlreadyVoted);

            let policy = ConsensusPolicy::stake_vote();
            let side = if aye { &mut proposal.votes_for } else { &mut proposal.votes_against };
            let tally = policy.contribute(*side, &Contribution::stake(stake)).ok_or(Error::<T>::Overflow)?;
            *side = tally.total;
            proposal.voter_count = proposal.voter_count.checked_add(1).ok_or(Error::<T>::Overflow)?;

            Votes::<T>::insert(proposal_id, &who, Ballot { aye, weight: tally.weight });
            Proposals::<T>::insert(proposal_id, proposal);

            Self::deposit_event(Event::Voted { proposal_id, voter: who, aye, weight: tally.weight });
            Ok(())
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::execute_proposal())]
        pub fn execute_proposal(origin: OriginFor<T>, proposal_id: EntityId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            Self::voting_power(&who)?;

            Proposals::<T>::try_mutate(proposal_id, |maybe_proposal| -> DispatchResult {
                let proposal = maybe_proposal.as_mut().ok_or(Error::<T>::ProposalNotFound)?;
                ensure!(!proposal.executed, Error::<T>::AlreadyExecuted);
                let now = <frame_system::Pallet<T>>::block_number();
                ensure!(proposal.window.has_elapsed(now), Error::<T>::VotingNotEnded);
                ensure!(
                    majority(proposal.votes_for, proposal.votes_against),
                    Error::<T>::MajorityNotReached
                );
                proposal
                    .phase
                    .transition(Phase::Finalized)
                    .map_err(|_| Error::<T>::ProposalNotActive)?;
                proposal.executed = true;

                log::debug!(
                    target: LOG_TARGET,
                    "proposal {} executed {} for / {} against",
                    proposal_id, proposal.votes_for, proposal.votes_against,
                );
                Self::deposit_event(Event::ProposalExecuted {
                    proposal_id,
                    votes_for: proposal.votes_for,
                    votes_against: proposal.votes_against,
                });
                Ok(())
            })
        }

        /// Move SDAO, and with it voting power, to another member.
        ///
        /// Votes already cast keep the weight they were cast with.
        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::transfer_stake())]
        pub fn transfer_stake(origin: OriginFor<T>, to: T::AccountId, amount: Balance) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_live()?;
            ensure!(Members::<T>::contains_key(&who), Error::<T>::NotMember);
            ensure!(Members::<T>::contains_key(&to), Error::<T>::NotMember);
            ensure!(who != to, Error::<T>::SelfTransfer);
            ensure!(amount > 0, Error::<T>::ZeroAmount);

            T::Credits::force_transfer(Self::asset()?, &Self::account_id(), &who, &to, amount)?;

            log::debug!(target: LOG_TARGET, "{:?} moved {} SDAO to {:?}", who, amount, to);
            Self::deposit_event(Event::StakeTransferred { from: who, to, amount });
            Ok(())
        }
    }

    // ================================================================
    // Internal helpers
    // ================================================================

    impl<T: Config> Pallet<T> {
        /// Issuer of SDAO.
        pub fn account_id() -> T::AccountId {
            T::PalletId::get().into_account_truncating()
        }

        fn ensure_live() -> Result<AppInfo<T::AccountId, BlockNumberFor<T>>, Error<T>> {
            let app = App::<T>::get().ok_or(Error::<T>::NotInitialized)?;
            ensure!(app.status == AppStatus::Live, Error::<T>::ApplicationClosed);
            Ok(app)
        }

        fn asset() -> Result<AssetId, Error<T>> {
            SdaoAsset::<T>::get().ok_or(Error::<T>::NotInitialized)
        }

        /// SDAO balance of a member holding any.
        fn voting_power(who: &T::AccountId) -> Result<Balance, Error<T>> {
            let asset = Self::asset()?;
            let standing = Members::<T>::contains_key(who).then(|| T::Credits::balance(asset, who));
            Guard::Positive { standing }.check(who).map_err(Error::<T>::from)?;
            Ok(standing.unwrap_or_default())
        }
    }
}
