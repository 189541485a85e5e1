//! Signed-invocation dispatcher.
//!
//! An invocation is a principal plus the SCALE encoding of exactly one
//! [`RuntimeCall`]. Bytes that do not decode to a known call, or that carry
//! trailing data, are rejected before any state is read. Decoded calls are
//! dispatched with a signed origin inside a storage layer, so a rejected call
//! leaves no trace. The events of an accepted call are returned with the
//! outcome.

use crate::{AccountId, Runtime, RuntimeCall, RuntimeEvent, RuntimeOrigin};
use alloc::vec::Vec;
use codec::DecodeLimit;
use frame_support::storage::with_storage_layer;
use sp_runtime::{traits::Dispatchable, DispatchError};

const LOG_TARGET: &str = "runtime::dispatch";

/// Nesting limit applied when decoding a call.
pub const MAX_CALL_DEPTH: u32 = 256;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Rejection {
    /// Input is not exactly one known call.
    Undecodable,
    /// The call was filtered or its precondition failed.
    Dispatch(DispatchError),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Outcome {
    pub result: Result<(), Rejection>,
    /// Events deposited by the call. Empty on rejection.
    pub events: Vec<RuntimeEvent>,
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        self.result.is_ok()
    }

    fn rejected(rejection: Rejection) -> Self {
        Self { result: Err(rejection), events: Vec::new() }
    }
}

/// Decode and dispatch one invocation on behalf of `who`.
pub fn invoke(who: AccountId, input: &[u8]) -> Outcome {
    let mut bytes = input;
    match RuntimeCall::decode_all_with_depth_limit(MAX_CALL_DEPTH, &mut bytes) {
        Ok(call) => dispatch(who, call),
        Err(_) => {
            log::debug!(target: LOG_TARGET, "rejected undecodable invocation ({} bytes)", input.len());
            Outcome::rejected(Rejection::Undecodable)
        }
    }
}

/// Dispatch an already decoded call on behalf of `who`.
pub fn dispatch(who: AccountId, call: RuntimeCall) -> Outcome {
    let result = with_storage_layer(|| {
        frame_system::Pallet::<Runtime>::reset_events();
        call.dispatch(RuntimeOrigin::signed(who)).map(|_| ()).map_err(|e| e.error)
    });

    match result {
        Ok(()) => Outcome {
            result: Ok(()),
            events: frame_system::Pallet::<Runtime>::read_events_no_consensus()
                .map(|record| record.event)
                .collect(),
        },
        Err(error) => {
            log::debug!(target: LOG_TARGET, "invocation rejected: {:?}", error);
            Outcome::rejected(Rejection::Dispatch(error))
        }
    }
}
