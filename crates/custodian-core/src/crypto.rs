//! secp256k1 signature recovery, keccak256 hashing, and address derivation.
//!
//! Signatures are recovered against the raw digest — no "Ethereum Signed
//! Message" prefix is ever applied. The upstream consensus signs the raw
//! header hash directly (§4.2); adding a prefix here would make every
//! legitimate finalization signature fail to recover.

use crate::types::header::{PublicKey, Signature};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::Message;
use tiny_keccak::{Hasher, Keccak};

/// keccak256 of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// The low 20 bytes of `keccak256(pk)` — the address a 64-byte public key
/// derives to.
pub fn pk_to_address(pk: &PublicKey) -> [u8; 20] {
    let hash = keccak256(&pk.0);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..32]);
    address
}

/// Recover the address that produced `signature` over `digest`.
///
/// Any malformed or invalid signature resolves to the zero address rather
/// than an error — per §4.2, the caller treats that as "this signer did not
/// contribute" and the quorum count simply doesn't credit it.
pub fn recover(digest: &[u8; 32], signature: &Signature) -> [u8; 20] {
    recover_inner(digest, signature).unwrap_or([0u8; 20])
}

fn recover_inner(digest: &[u8; 32], signature: &Signature) -> Option<[u8; 20]> {
    let recovery_id = match signature.v() {
        27 => RecoveryId::from_i32(0).ok()?,
        28 => RecoveryId::from_i32(1).ok()?,
        _ => return None,
    };

    let recoverable = RecoverableSignature::from_compact(signature.r_s(), recovery_id).ok()?;
    let message = Message::from_digest(*digest);
    let public_key = secp256k1::SECP256K1.recover_ecdsa(&message, &recoverable).ok()?;

    let uncompressed = public_key.serialize_uncompressed();
    // uncompressed[0] is the 0x04 tag; the remaining 64 bytes are X‖Y.
    let mut pk64 = [0u8; 64];
    pk64.copy_from_slice(&uncompressed[1..]);
    Some(pk_to_address(&PublicKey(pk64)))
}
