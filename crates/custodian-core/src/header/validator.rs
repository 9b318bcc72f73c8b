//! `HeaderValidator::advance` (§4.3): the single entry point for extending
//! the finalized chain by one header.

use thiserror::Error;

use crate::codec::{decode_block_header, decode_finalization_proof, CodecError};
use crate::crypto::keccak256;
use crate::host::{Event, HostHooks};
use crate::state::LightClientState;

use super::quorum::verify_finalization_quorum;

/// Everything that can make `advance` reject a candidate header.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("candidate header height {got} is not one greater than the current height {current}")]
    HeightGap { current: u64, got: u64 },

    #[error("candidate header's previous_hash does not match keccak256 of the last accepted header")]
    BrokenChain,

    #[error("candidate header timestamp {got} is earlier than the last accepted header's timestamp {last}")]
    NonMonotoneTime { last: i64, got: i64 },

    #[error("candidate header's author is not a member of the last accepted header's validator set")]
    UnknownAuthor,

    #[error("finalization proof carries {voted} of {total} voting power, short of the required quorum")]
    InsufficientQuorum { voted: u128, total: u128 },
}

/// Validate and accept `next_header_bytes` as the successor to
/// `state`'s current header, verifying it against `proof_bytes`
/// (a standalone finalization-proof blob, not the copy embedded in the
/// header itself — see §4.3 step 6).
///
/// On success, `state` is advanced and an `UpdateLightClient` event is
/// emitted through `hooks`.
#[tracing::instrument(skip(state, hooks, next_header_bytes, proof_bytes), fields(current_height = state.current_height()), err)]
pub fn advance<H: HostHooks>(
    state: &mut LightClientState,
    hooks: &mut H,
    next_header_bytes: &[u8],
    proof_bytes: &[u8],
) -> Result<(), HeaderError> {
    let last = decode_block_header(state.last_header())?;
    let next = decode_block_header(next_header_bytes)?;

    if next.block_height != state.current_height() + 1 {
        return Err(HeaderError::HeightGap { current: state.current_height(), got: next.block_height });
    }

    let expected_previous_hash = keccak256(state.last_header());
    if next.previous_hash != expected_previous_hash {
        return Err(HeaderError::BrokenChain);
    }

    if next.timestamp < last.timestamp {
        return Err(HeaderError::NonMonotoneTime { last: last.timestamp, got: next.timestamp });
    }

    let author_digest = keccak256(&next.author.0);
    let author_known = last
        .validators
        .iter()
        .any(|v| keccak256(&v.public_key.0) == author_digest);
    if !author_known {
        return Err(HeaderError::UnknownAuthor);
    }

    let proof = decode_finalization_proof(proof_bytes)?;
    let digest = keccak256(next_header_bytes);
    verify_finalization_quorum(&last.validators, &digest, &proof)?;

    state.accept(next_header_bytes.to_vec(), next.commit_merkle_root);
    hooks.emit_event(Event::UpdateLightClient {
        block_height: next.block_height,
        last_header: next_header_bytes.to_vec(),
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_block_header, encode_finalization_proof};
    use crate::crypto::keccak256 as hash;
    use crate::types::header::{BlockHeader, PublicKey, Signature, TypedSignature, Validator, PUBLIC_KEY_LEN};
    use secp256k1::{Keypair, Message, Secp256k1, SecretKey};

    struct RecordingHooks {
        events: Vec<Event>,
    }

    impl HostHooks for RecordingHooks {
        fn emit_event(&mut self, event: Event) {
            self.events.push(event);
        }
    }

    fn keypair() -> (SecretKey, PublicKey) {
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(&[0x11u8; 32]).unwrap();
        let keypair = Keypair::from_secret_key(&secp, &secret);
        let uncompressed = keypair.public_key().serialize_uncompressed();
        let mut pk64 = [0u8; 64];
        pk64.copy_from_slice(&uncompressed[1..]);
        (secret, PublicKey(pk64))
    }

    fn sign(secret: &SecretKey, digest: &[u8; 32]) -> Signature {
        let secp = Secp256k1::new();
        let message = Message::from_digest(*digest);
        let (recovery_id, compact) = secp
            .sign_ecdsa_recoverable(&message, secret)
            .serialize_compact();
        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&compact);
        bytes[64] = 27 + recovery_id.to_i32() as u8;
        Signature(bytes)
    }

    fn header(block_height: u64, timestamp: i64, previous_hash: [u8; 32], author: PublicKey, validators: Vec<Validator>) -> BlockHeader {
        BlockHeader {
            author,
            prev_block_finalization_proof: vec![],
            previous_hash,
            block_height,
            timestamp,
            commit_merkle_root: [0u8; 32],
            validators,
            version: *b"v1.0.",
        }
    }

    #[test]
    fn advance_accepts_a_unanimously_signed_successor() {
        let (secret, pk) = keypair();
        let validators = vec![Validator { public_key: pk, voting_power: 100 }];

        let genesis = header(10, 1_000, [0u8; 32], pk, validators.clone());
        let genesis_bytes = encode_block_header(&genesis);
        let mut state = LightClientState::new(&genesis_bytes, b"mainnet".to_vec()).unwrap();

        let next = header(11, 1_001, hash(&genesis_bytes), pk, validators.clone());
        let next_bytes = encode_block_header(&next);
        let digest = hash(&next_bytes);
        let proof = encode_finalization_proof(&[TypedSignature { signature: sign(&secret, &digest), signer: pk }]);

        let mut hooks = RecordingHooks { events: vec![] };
        advance(&mut state, &mut hooks, &next_bytes, &proof).unwrap();

        assert_eq!(state.current_height(), 11);
        assert_eq!(hooks.events.len(), 1);
        assert!(matches!(hooks.events[0], Event::UpdateLightClient { block_height: 11, .. }));
    }

    #[test]
    fn advance_rejects_height_gap() {
        let (_secret, pk) = keypair();
        let validators = vec![Validator { public_key: pk, voting_power: 100 }];
        let genesis = header(10, 1_000, [0u8; 32], pk, validators.clone());
        let genesis_bytes = encode_block_header(&genesis);
        let mut state = LightClientState::new(&genesis_bytes, b"mainnet".to_vec()).unwrap();

        let next = header(12, 1_001, hash(&genesis_bytes), pk, validators);
        let next_bytes = encode_block_header(&next);
        let proof = encode_finalization_proof(&[]);

        let mut hooks = RecordingHooks { events: vec![] };
        let result = advance(&mut state, &mut hooks, &next_bytes, &proof);
        assert!(matches!(result, Err(HeaderError::HeightGap { current: 10, got: 12 })));
    }

    #[test]
    fn advance_rejects_unknown_author() {
        let (_secret, pk) = keypair();
        let (_other_secret, other_pk) = {
            let secp = Secp256k1::new();
            let secret = SecretKey::from_slice(&[0x22u8; 32]).unwrap();
            let keypair = Keypair::from_secret_key(&secp, &secret);
            let uncompressed = keypair.public_key().serialize_uncompressed();
            let mut pk64 = [0u8; 64];
            pk64.copy_from_slice(&uncompressed[1..]);
            (secret, PublicKey(pk64))
        };
        let validators = vec![Validator { public_key: pk, voting_power: 100 }];
        let genesis = header(10, 1_000, [0u8; 32], pk, validators.clone());
        let genesis_bytes = encode_block_header(&genesis);
        let mut state = LightClientState::new(&genesis_bytes, b"mainnet".to_vec()).unwrap();

        let next = header(11, 1_001, hash(&genesis_bytes), other_pk, validators);
        let next_bytes = encode_block_header(&next);
        let proof = encode_finalization_proof(&[]);

        let mut hooks = RecordingHooks { events: vec![] };
        let result = advance(&mut state, &mut hooks, &next_bytes, &proof);
        assert!(matches!(result, Err(HeaderError::UnknownAuthor)));
    }

    #[test]
    fn advance_rejects_insufficient_quorum() {
        let (_secret, pk) = keypair();
        let validators = vec![Validator { public_key: pk, voting_power: 100 }];
        let genesis = header(10, 1_000, [0u8; 32], pk, validators.clone());
        let genesis_bytes = encode_block_header(&genesis);
        let mut state = LightClientState::new(&genesis_bytes, b"mainnet".to_vec()).unwrap();

        let next = header(11, 1_001, hash(&genesis_bytes), pk, validators);
        let next_bytes = encode_block_header(&next);
        let proof = encode_finalization_proof(&[]);

        let mut hooks = RecordingHooks { events: vec![] };
        let result = advance(&mut state, &mut hooks, &next_bytes, &proof);
        assert!(matches!(result, Err(HeaderError::InsufficientQuorum { voted: 0, total: 100 })));
    }

    #[test]
    fn advance_rejects_broken_chain_link() {
        let (secret, pk) = keypair();
        let validators = vec![Validator { public_key: pk, voting_power: 100 }];
        let genesis = header(10, 1_000, [0u8; 32], pk, validators.clone());
        let genesis_bytes = encode_block_header(&genesis);
        let mut state = LightClientState::new(&genesis_bytes, b"mainnet".to_vec()).unwrap();

        let next = header(11, 1_001, [0xFFu8; 32], pk, validators);
        let next_bytes = encode_block_header(&next);
        let digest = hash(&next_bytes);
        let proof = encode_finalization_proof(&[TypedSignature { signature: sign(&secret, &digest), signer: pk }]);

        let mut hooks = RecordingHooks { events: vec![] };
        let result = advance(&mut state, &mut hooks, &next_bytes, &proof);
        assert!(matches!(result, Err(HeaderError::BrokenChain)));
    }
}
