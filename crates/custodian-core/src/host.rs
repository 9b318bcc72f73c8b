//! External collaborators (§6).
//!
//! `AssetLedger` and `HostHooks` are the two capabilities this engine
//! assumes are supplied by the host ledger. They are traits, not `dyn`
//! objects: `WithdrawalDispatcher::execute` and `HeaderValidator::advance`
//! are generic over whatever concrete type implements them, the same way
//! `lumen-core`'s functions take borrowed data rather than erasing it behind
//! a trait object.
//!
//! Reentrancy guards, pause/owner gating, and mutual exclusion around
//! `LightClientState` are the host's responsibility around *calling* this
//! engine (§5) — they are not operations the engine itself invokes, so they
//! have no representation here.

use serde::{Deserialize, Serialize};

/// Token custody primitives the engine delegates asset releases to.
///
/// Each release must either succeed or fail atomically; a failing release
/// aborts `execute` with no asset moved and no event emitted.
pub trait AssetLedger {
    type Error: std::error::Error + Send + Sync + 'static;

    fn native_balance(&self) -> u128;
    fn release_native(&mut self, to: [u8; 20], amount: u128) -> Result<(), Self::Error>;

    fn fungible_balance(&self, token: [u8; 20]) -> u128;
    fn release_fungible(&mut self, token: [u8; 20], to: [u8; 20], amount: u128) -> Result<(), Self::Error>;

    fn owner_of(&self, collection: [u8; 20], token_id: u128) -> [u8; 20];
    fn release_non_fungible(
        &mut self,
        collection: [u8; 20],
        to: [u8; 20],
        token_id: u128,
    ) -> Result<(), Self::Error>;
}

/// The one host capability the engine actively calls: event transport.
pub trait HostHooks {
    fn emit_event(&mut self, event: Event);
}

/// The three events this engine ever emits (§6).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    TransferFungibleToken {
        token_address: [u8; 20],
        amount: u128,
        receiver: [u8; 20],
        contract_sequence: u128,
    },
    TransferNonFungibleToken {
        collection_address: [u8; 20],
        token_id: u128,
        receiver: [u8; 20],
        contract_sequence: u128,
    },
    UpdateLightClient {
        block_height: u64,
        last_header: Vec<u8>,
    },
}
