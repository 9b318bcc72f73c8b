//! `WithdrawalDispatcher::execute` (§4.6): turning one committed
//! withdrawal transaction into an asset release.

use thiserror::Error;

use crate::codec::{decode_execution_payload, CodecError};
use crate::crypto::keccak256;
use crate::host::{AssetLedger, Event, HostHooks};
use crate::merkle::{verify_commitment, MerkleError};
use crate::state::LightClientState;
use crate::types::payload::ExecutionPayload;

use super::envelope::{parse_execution_hash, parse_payload_kind, EnvelopeError};

#[derive(Debug, Error)]
pub enum ExecutionError<E: std::error::Error + Send + Sync + 'static> {
    #[error("transaction envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("merkle proof error: {0}")]
    Merkle(#[from] MerkleError),

    #[error("execution payload's keccak256 does not match the hash embedded in the transaction")]
    ExecutionHashMismatch,

    #[error("execution payload targets chain {got:?}, expected {expected:?}")]
    WrongChain { expected: Vec<u8>, got: Vec<u8> },

    #[error("execution payload carries contract sequence {got}, expected 0 (this engine is single-instance)")]
    WrongSequence { got: u128 },

    #[error("asset ledger rejected the release: {0}")]
    Asset(#[source] E),
}

/// Verify and execute one committed withdrawal transaction (§4.6 steps 1-7).
///
/// `transaction_bytes` is the raw, whole transaction as committed;
/// `execution_payload_bytes` is the `ExecutionPayload` it carries;
/// `merkle_proof_bytes` proves `transaction_bytes` was committed at
/// `block_height` under `state`'s tracked commit roots.
#[tracing::instrument(skip_all, fields(block_height), err)]
pub fn execute<L: AssetLedger, H: HostHooks>(
    state: &LightClientState,
    ledger: &mut L,
    hooks: &mut H,
    transaction_bytes: &[u8],
    execution_payload_bytes: &[u8],
    block_height: u64,
    merkle_proof_bytes: &[u8],
) -> Result<Event, ExecutionError<L::Error>> {
    let embedded_hash = parse_execution_hash(transaction_bytes)?;
    let payload_kind = parse_payload_kind(transaction_bytes)?;

    let computed_hash = keccak256(execution_payload_bytes);
    if computed_hash != embedded_hash {
        return Err(ExecutionError::ExecutionHashMismatch);
    }

    let payload = decode_execution_payload(execution_payload_bytes, payload_kind)?;

    if payload.contract_sequence() != 0 {
        return Err(ExecutionError::WrongSequence { got: payload.contract_sequence() });
    }
    if payload.chain() != state.chain_name() {
        return Err(ExecutionError::WrongChain {
            expected: state.chain_name().to_vec(),
            got: payload.chain().to_vec(),
        });
    }

    verify_commitment(
        transaction_bytes,
        state.commit_roots(),
        merkle_proof_bytes,
        block_height,
        state.height_offset(),
    )?;

    let event = match payload {
        ExecutionPayload::Fungible(transfer) => {
            if transfer.token_address == [0u8; 20] {
                ledger
                    .release_native(transfer.receiver_address, transfer.amount)
                    .map_err(ExecutionError::Asset)?;
            } else {
                ledger
                    .release_fungible(transfer.token_address, transfer.receiver_address, transfer.amount)
                    .map_err(ExecutionError::Asset)?;
            }
            Event::TransferFungibleToken {
                token_address: transfer.token_address,
                amount: transfer.amount,
                receiver: transfer.receiver_address,
                contract_sequence: transfer.contract_sequence,
            }
        }
        ExecutionPayload::NonFungible(transfer) => {
            ledger
                .release_non_fungible(transfer.collection_address, transfer.receiver_address, transfer.token_id)
                .map_err(ExecutionError::Asset)?;
            Event::TransferNonFungibleToken {
                collection_address: transfer.collection_address,
                token_id: transfer.token_id,
                receiver: transfer.receiver_address,
                contract_sequence: transfer.contract_sequence,
            }
        }
    };

    hooks.emit_event(event.clone());
    Ok(event)
}
