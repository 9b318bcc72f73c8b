use super::{CodecError, Cursor};
use crate::types::payload::{ExecutionPayload, FungibleTransfer, NonFungibleTransfer, PayloadKind};

/// Decode an `ExecutionPayload` per §4.1: `chainLen:8 ‖ chain:var ‖
/// contractSequence:16 ‖ enumTag:4 (discarded) ‖ address:20 ‖
/// amountOrTokenId:16 ‖ address:20`.
///
/// `kind` comes from the enclosing transaction's offset-73 discriminator
/// (§4.6) — the payload bytes alone don't self-describe which schema they use.
pub fn decode_execution_payload(bytes: &[u8], kind: PayloadKind) -> Result<ExecutionPayload, CodecError> {
    let mut cursor = Cursor::new(bytes);

    let chain_len = cursor.read_u64_le("execution_payload.chain_len")? as usize;
    let chain = cursor.read_vec(chain_len, "execution_payload.chain")?;
    let contract_sequence = cursor.read_u128_le("execution_payload.contract_sequence")?;
    let _enum_tag = cursor.read_array::<4>("execution_payload.enum_tag")?;
    let first_address = cursor.read_array::<20>("execution_payload.first_address")?;
    let amount_or_token_id = cursor.read_u128_le("execution_payload.amount_or_token_id")?;
    let receiver_address = cursor.read_array::<20>("execution_payload.receiver_address")?;

    cursor.finish("execution_payload")?;

    Ok(match kind {
        PayloadKind::Fungible => ExecutionPayload::Fungible(FungibleTransfer {
            contract_sequence,
            amount: amount_or_token_id,
            chain,
            token_address: first_address,
            receiver_address,
        }),
        PayloadKind::NonFungible => ExecutionPayload::NonFungible(NonFungibleTransfer {
            contract_sequence,
            token_id: amount_or_token_id,
            chain,
            collection_address: first_address,
            receiver_address,
        }),
    })
}

/// Encode an `ExecutionPayload` in the same layout `decode_execution_payload` reads.
pub fn encode_execution_payload(payload: &ExecutionPayload) -> Vec<u8> {
    let mut out = Vec::new();

    let (chain, contract_sequence, first_address, amount_or_token_id, receiver_address) = match payload {
        ExecutionPayload::Fungible(f) => (
            &f.chain,
            f.contract_sequence,
            f.token_address,
            f.amount,
            f.receiver_address,
        ),
        ExecutionPayload::NonFungible(nf) => (
            &nf.chain,
            nf.contract_sequence,
            nf.collection_address,
            nf.token_id,
            nf.receiver_address,
        ),
    };

    out.extend_from_slice(&(chain.len() as u64).to_le_bytes());
    out.extend_from_slice(chain);
    out.extend_from_slice(&contract_sequence.to_le_bytes());
    let tag: u32 = match payload {
        ExecutionPayload::Fungible(_) => PayloadKind::FUNGIBLE_TAG as u32,
        ExecutionPayload::NonFungible(_) => PayloadKind::NON_FUNGIBLE_TAG as u32,
    };
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&first_address);
    out.extend_from_slice(&amount_or_token_id.to_le_bytes());
    out.extend_from_slice(&receiver_address);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_fungible_transfer() {
        let payload = ExecutionPayload::Fungible(FungibleTransfer {
            contract_sequence: 0,
            amount: 500_000_000_000_000_000_000u128,
            chain: b"mainnet".to_vec(),
            token_address: [0u8; 20],
            receiver_address: [0xAA; 20],
        });
        let encoded = encode_execution_payload(&payload);
        let decoded = decode_execution_payload(&encoded, PayloadKind::Fungible).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn round_trips_non_fungible_transfer() {
        let payload = ExecutionPayload::NonFungible(NonFungibleTransfer {
            contract_sequence: 0,
            token_id: 42,
            chain: b"mainnet".to_vec(),
            collection_address: [0x11; 20],
            receiver_address: [0x22; 20],
        });
        let encoded = encode_execution_payload(&payload);
        let decoded = decode_execution_payload(&encoded, PayloadKind::NonFungible).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn rejects_truncated_payload() {
        let payload = ExecutionPayload::Fungible(FungibleTransfer {
            contract_sequence: 0,
            amount: 1,
            chain: b"mainnet".to_vec(),
            token_address: [0u8; 20],
            receiver_address: [0u8; 20],
        });
        let encoded = encode_execution_payload(&payload);
        let truncated = &encoded[..encoded.len() - 5];
        assert!(matches!(
            decode_execution_payload(truncated, PayloadKind::Fungible),
            Err(CodecError::Truncated { .. })
        ));
    }
}
