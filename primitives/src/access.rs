//! Sender guards evaluated before any mutation.
//!
//! A guard is a pure check over values the caller has already read from
//! storage. Pallets map a [`Denial`] onto their own error enum so a failed
//! guard aborts the invocation like any other precondition.

use crate::ReputationScore;

/// Why a guard refused the sender.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Denial {
    /// Sender is neither the authority nor an accepted creator.
    NotAuthorized,
    /// Sender holds no registration in the application.
    Unregistered,
    /// Sender's standing is below the required floor.
    BelowFloor,
}

/// Access policy for a single invocation.
#[derive(Clone, Debug)]
pub enum Guard<'a, AccountId> {
    /// Sender must be the recorded authority.
    Authority(&'a AccountId),
    /// Sender must be the authority or the entity's creator.
    AuthorityOrCreator { authority: &'a AccountId, creator: &'a AccountId },
    /// Sender's standing must be at least `floor`. `None` standing means unregistered.
    AtLeast { standing: Option<ReputationScore>, floor: ReputationScore },
    /// Sender's standing must be strictly positive.
    Positive { standing: Option<u128> },
    /// Authority always passes; anyone else must clear the floor.
    AuthorityOrAtLeast {
        authority: &'a AccountId,
        standing: Option<ReputationScore>,
        floor: ReputationScore,
    },
}

impl<'a, AccountId: PartialEq> Guard<'a, AccountId> {
    pub fn check(&self, who: &AccountId) -> Result<(), Denial> {
        match *self {
            Guard::Authority(authority) => {
                if who == authority { Ok(()) } else { Err(Denial::NotAuthorized) }
            }
            Guard::AuthorityOrCreator { authority, creator } => {
                if who == authority || who == creator {
                    Ok(())
                } else {
                    Err(Denial::NotAuthorized)
                }
            }
            Guard::AtLeast { standing, floor } => meets_floor(standing, floor),
            Guard::Positive { standing } => match standing {
                None => Err(Denial::Unregistered),
                Some(0) => Err(Denial::BelowFloor),
                Some(_) => Ok(()),
            },
            Guard::AuthorityOrAtLeast { authority, standing, floor } => {
                if who == authority {
                    return Ok(());
                }
                meets_floor(standing, floor)
            }
        }
    }
}

fn meets_floor(standing: Option<ReputationScore>, floor: ReputationScore) -> Result<(), Denial> {
    match standing {
        None => Err(Denial::Unregistered),
        Some(value) if value >= floor => Ok(()),
        Some(_) => Err(Denial::BelowFloor),
    }
}
