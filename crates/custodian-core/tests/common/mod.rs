//! Shared fixtures for the scenario tests in this directory.

use custodian_core::codec::{encode_block_header, encode_execution_payload, encode_finalization_proof};
use custodian_core::crypto::keccak256;
use custodian_core::merkle::encode_proof;
use custodian_core::types::header::{BlockHeader, PublicKey, Signature, TypedSignature, Validator};
use custodian_core::types::payload::{ExecutionPayload, FungibleTransfer, PayloadKind};
use custodian_core::{AssetLedger, Event, HostHooks};
use secp256k1::{Keypair, Message, Secp256k1, SecretKey};

pub const CHAIN_NAME: &[u8] = b"mainnet";

pub fn keypair(seed: u8) -> (SecretKey, PublicKey) {
    let secp = Secp256k1::new();
    let secret = SecretKey::from_slice(&[seed; 32]).unwrap();
    let pair = Keypair::from_secret_key(&secp, &secret);
    let uncompressed = pair.public_key().serialize_uncompressed();
    let mut pk64 = [0u8; 64];
    pk64.copy_from_slice(&uncompressed[1..]);
    (secret, PublicKey(pk64))
}

pub fn sign(secret: &SecretKey, digest: &[u8; 32]) -> Signature {
    let secp = Secp256k1::new();
    let message = Message::from_digest(*digest);
    let (recovery_id, compact) = secp.sign_ecdsa_recoverable(&message, secret).serialize_compact();
    let mut bytes = [0u8; 65];
    bytes[..64].copy_from_slice(&compact);
    bytes[64] = 27 + recovery_id.to_i32() as u8;
    Signature(bytes)
}

pub fn header(
    block_height: u64,
    timestamp: i64,
    previous_hash: [u8; 32],
    commit_merkle_root: [u8; 32],
    author: PublicKey,
    validators: Vec<Validator>,
) -> BlockHeader {
    BlockHeader {
        author,
        prev_block_finalization_proof: vec![],
        previous_hash,
        block_height,
        timestamp,
        commit_merkle_root,
        validators,
        version: *b"v1.0.",
    }
}

pub fn encode_header(h: &BlockHeader) -> Vec<u8> {
    encode_block_header(h)
}

pub fn proof_of(signatures: &[TypedSignature]) -> Vec<u8> {
    encode_finalization_proof(signatures)
}

pub fn zero_step_merkle_proof() -> Vec<u8> {
    encode_proof(&[])
}

/// A withdrawal transaction whose keccak256 is, by construction, the commit
/// root, and which embeds `payload_hash` at the expected envelope offset.
pub fn build_transaction(payload_hash: [u8; 32], tag: u64) -> Vec<u8> {
    let mut tx = vec![0xABu8; 73];
    tx.extend_from_slice(&tag.to_le_bytes());
    tx.extend_from_slice(b"AA");
    tx.extend_from_slice(hex::encode(payload_hash).as_bytes());
    tx.extend_from_slice(b"ZZ");
    tx
}

pub fn fungible_payload(amount: u128, token: [u8; 20], receiver: [u8; 20]) -> ExecutionPayload {
    ExecutionPayload::Fungible(FungibleTransfer {
        contract_sequence: 0,
        amount,
        chain: CHAIN_NAME.to_vec(),
        token_address: token,
        receiver_address: receiver,
    })
}

pub fn encode_payload(payload: &ExecutionPayload) -> Vec<u8> {
    encode_execution_payload(payload)
}

pub fn commit_root_for_transaction(tx: &[u8]) -> [u8; 32] {
    keccak256(tx)
}

pub const FUNGIBLE_TAG: u64 = PayloadKind::FUNGIBLE_TAG;

#[derive(Debug, Default)]
pub struct FakeLedger {
    pub released_fungible: Vec<([u8; 20], [u8; 20], u128)>,
    pub released_non_fungible: Vec<([u8; 20], [u8; 20], u128)>,
}

#[derive(Debug)]
pub struct FakeLedgerError;

impl std::fmt::Display for FakeLedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fake ledger error")
    }
}
impl std::error::Error for FakeLedgerError {}

impl AssetLedger for FakeLedger {
    type Error = FakeLedgerError;

    fn native_balance(&self) -> u128 {
        0
    }
    fn release_native(&mut self, _to: [u8; 20], _amount: u128) -> Result<(), Self::Error> {
        Ok(())
    }
    fn fungible_balance(&self, _token: [u8; 20]) -> u128 {
        0
    }
    fn release_fungible(&mut self, token: [u8; 20], to: [u8; 20], amount: u128) -> Result<(), Self::Error> {
        self.released_fungible.push((token, to, amount));
        Ok(())
    }
    fn owner_of(&self, _collection: [u8; 20], _token_id: u128) -> [u8; 20] {
        [0u8; 20]
    }
    fn release_non_fungible(&mut self, collection: [u8; 20], to: [u8; 20], token_id: u128) -> Result<(), Self::Error> {
        self.released_non_fungible.push((collection, to, token_id));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub events: Vec<Event>,
}

impl HostHooks for RecordingHooks {
    fn emit_event(&mut self, event: Event) {
        self.events.push(event);
    }
}
