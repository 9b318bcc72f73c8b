use super::{CodecError, Cursor};
use crate::types::header::{
    BlockHeader, PublicKey, Signature, TypedSignature, Validator, PUBLIC_KEY_LEN, SIGNATURE_LEN,
    VERSION_LEN,
};

/// Byte width of one `(signature ‖ prefix ‖ signer)` entry, per §4.1.
const PROOF_ENTRY_LEN: usize = SIGNATURE_LEN + 1 + PUBLIC_KEY_LEN;

fn decode_typed_signature(cursor: &mut Cursor<'_>, context: &'static str) -> Result<TypedSignature, CodecError> {
    let signature = Signature(cursor.read_array::<SIGNATURE_LEN>(context)?);
    let _signer_tag = cursor.read_u8(context)?;
    let signer = PublicKey(cursor.read_array::<PUBLIC_KEY_LEN>(context)?);
    Ok(TypedSignature { signature, signer })
}

fn encode_typed_signature(out: &mut Vec<u8>, entry: &TypedSignature) {
    out.extend_from_slice(&entry.signature.0);
    out.push(0x04);
    out.extend_from_slice(&entry.signer.0);
}

/// Decode a standalone finalization-proof blob (the `proofBytes` argument to
/// `HeaderValidator::advance`): `count:8 ‖ (signature:65 ‖ prefix:1 ‖ signer:64)*`.
///
/// Unlike the copy of this layout embedded in a header, the standalone blob
/// must be consumed exactly — any trailing or missing bytes are
/// `LengthMismatch`, not silently ignored.
pub fn decode_finalization_proof(bytes: &[u8]) -> Result<Vec<TypedSignature>, CodecError> {
    let mut cursor = Cursor::new(bytes);
    let count = cursor.read_u64_le("finalization_proof.count")? as usize;

    let expected_remaining = count
        .checked_mul(PROOF_ENTRY_LEN)
        .ok_or(CodecError::LengthMismatch {
            context: "finalization_proof.body",
            expected: usize::MAX,
            got: cursor.remaining(),
        })?;
    if cursor.remaining() != expected_remaining {
        return Err(CodecError::LengthMismatch {
            context: "finalization_proof.body",
            expected: expected_remaining,
            got: cursor.remaining(),
        });
    }

    let mut signatures = Vec::with_capacity(count);
    for _ in 0..count {
        signatures.push(decode_typed_signature(&mut cursor, "finalization_proof.entry")?);
    }
    cursor.finish("finalization_proof")?;
    Ok(signatures)
}

/// Encode a finalization proof in the same layout `decode_finalization_proof` reads.
pub fn encode_finalization_proof(signatures: &[TypedSignature]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + signatures.len() * PROOF_ENTRY_LEN);
    out.extend_from_slice(&(signatures.len() as u64).to_le_bytes());
    for entry in signatures {
        encode_typed_signature(&mut out, entry);
    }
    out
}

/// Decode a `BlockHeader` per the wire layout of §4.1.
pub fn decode_block_header(bytes: &[u8]) -> Result<BlockHeader, CodecError> {
    let mut cursor = Cursor::new(bytes);

    let _author_tag = cursor.read_u8("header.author_tag")?;
    let author = PublicKey(cursor.read_array::<PUBLIC_KEY_LEN>("header.author")?);

    let proof_len = cursor.read_u64_le("header.finalization_proof_len")? as usize;
    let mut prev_block_finalization_proof = Vec::with_capacity(proof_len);
    for _ in 0..proof_len {
        prev_block_finalization_proof.push(decode_typed_signature(
            &mut cursor,
            "header.finalization_proof_entry",
        )?);
    }

    let previous_hash = cursor.read_array::<32>("header.previous_hash")?;
    let block_height = cursor.read_u64_le("header.block_height")?;
    let timestamp = cursor.read_i64_le("header.timestamp")?;
    let commit_merkle_root = cursor.read_array::<32>("header.commit_merkle_root")?;
    // repositoryMerkleRoot: carried on the wire, unused by this engine.
    let _repository_merkle_root = cursor.read_array::<32>("header.repository_merkle_root")?;

    let validators_len = cursor.read_u64_le("header.validators_len")? as usize;
    let mut validators = Vec::with_capacity(validators_len);
    for _ in 0..validators_len {
        let _validator_tag = cursor.read_u8("header.validator_entry")?;
        let public_key = PublicKey(cursor.read_array::<PUBLIC_KEY_LEN>("header.validator_entry")?);
        let voting_power = cursor.read_u64_le("header.validator_entry")?;
        validators.push(Validator { public_key, voting_power });
    }

    // version length is always 5 on the wire; the field is read to advance
    // the cursor and otherwise ignored, per §4.1.
    let _version_len = cursor.read_u64_le("header.version_len")?;
    let version = cursor.read_array::<VERSION_LEN>("header.version")?;

    cursor.finish("header")?;

    Ok(BlockHeader {
        author,
        prev_block_finalization_proof,
        previous_hash,
        block_height,
        timestamp,
        commit_merkle_root,
        validators,
        version,
    })
}

/// Encode a `BlockHeader` in the same layout `decode_block_header` reads.
///
/// The discarded prefix-tag bytes are re-added as `0x04` (the conventional
/// uncompressed-point tag) — their value is never interpreted on decode, so
/// any byte would round-trip correctly, but `0x04` keeps encoded headers
/// looking like real secp256k1 key material.
pub fn encode_block_header(header: &BlockHeader) -> Vec<u8> {
    let mut out = Vec::new();

    out.push(0x04);
    out.extend_from_slice(&header.author.0);

    out.extend_from_slice(&(header.prev_block_finalization_proof.len() as u64).to_le_bytes());
    for entry in &header.prev_block_finalization_proof {
        encode_typed_signature(&mut out, entry);
    }

    out.extend_from_slice(&header.previous_hash);
    out.extend_from_slice(&header.block_height.to_le_bytes());
    out.extend_from_slice(&header.timestamp.to_le_bytes());
    out.extend_from_slice(&header.commit_merkle_root);
    out.extend_from_slice(&[0u8; 32]); // repositoryMerkleRoot, unused

    out.extend_from_slice(&(header.validators.len() as u64).to_le_bytes());
    for validator in &header.validators {
        out.push(0x04);
        out.extend_from_slice(&validator.public_key.0);
        out.extend_from_slice(&validator.voting_power.to_le_bytes());
    }

    out.extend_from_slice(&(VERSION_LEN as u64).to_le_bytes());
    out.extend_from_slice(&header.version);

    out
}
