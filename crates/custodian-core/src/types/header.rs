use serde::{Deserialize, Serialize};

/// Length of the uncompressed secp256k1 public key this system carries:
/// the X‖Y pair, with the leading `0x04` tag stripped on decode.
pub const PUBLIC_KEY_LEN: usize = 64;

/// Length of a recoverable ECDSA signature: `r‖s‖v`.
pub const SIGNATURE_LEN: usize = 65;

/// Length of the fixed `version` field carried on every header.
pub const VERSION_LEN: usize = 5;

/// A 64-byte uncompressed secp256k1 public key (X‖Y, no leading tag byte).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LEN]);

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey(0x{})", hex::encode(self.0))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        if bytes.len() != PUBLIC_KEY_LEN {
            return Err(serde::de::Error::custom("public key must be 64 bytes"));
        }
        let mut arr = [0u8; PUBLIC_KEY_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

/// A recoverable secp256k1 signature: `r‖s‖v`, `v ∈ {27, 28}`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_LEN]);

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature(0x{})", hex::encode(self.0))
    }
}

impl Signature {
    pub fn r_s(&self) -> &[u8] {
        &self.0[0..64]
    }

    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

/// A single finalization vote: the signature plus the 64-byte key of its signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypedSignature {
    pub signature: Signature,
    pub signer: PublicKey,
}

/// A validator's public key and the voting power it carries for the block
/// that names it in `BlockHeader::validators`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validator {
    pub public_key: PublicKey,
    pub voting_power: u64,
}

/// The full upstream consensus header.
///
/// `repositoryMerkleRoot` is part of the wire layout (§4.1) but carries no
/// meaning to this engine; the codec skips it and it has no field here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    /// The block's proposer.
    pub author: PublicKey,
    /// The quorum that finalized the *previous* header. Carried for
    /// completeness (round-trip law); `HeaderValidator::advance` verifies
    /// quorum against a separately supplied proof, not this field.
    pub prev_block_finalization_proof: Vec<TypedSignature>,
    /// `keccak256` of the previous header's raw bytes.
    pub previous_hash: [u8; 32],
    pub block_height: u64,
    pub timestamp: i64,
    /// Merkle root over this block's committed transactions.
    pub commit_merkle_root: [u8; 32],
    /// The validator set that will finalize *this* block.
    pub validators: Vec<Validator>,
    /// Fixed-length protocol version string, carried but not interpreted.
    pub version: [u8; VERSION_LEN],
}

impl BlockHeader {
    /// Total voting power over `validators`, as a widened accumulator so
    /// summing 64-bit powers can never overflow.
    pub fn total_voting_power(&self) -> u128 {
        self.validators.iter().map(|v| v.voting_power as u128).sum()
    }
}
