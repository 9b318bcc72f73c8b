use crate::crypto::{pk_to_address, recover};
use crate::types::header::{TypedSignature, Validator};

use super::validator::HeaderError;

/// Credit each `proof[j]` to `validators[j]` — a **positional** pairing, not
/// an identity lookup. This is an intentional simplification of the upstream
/// protocol and is the quorum contract this engine honours; an out-of-order
/// proof is therefore not accepted even if every signature is individually
/// valid for some validator.
///
/// Requires strictly more than two-thirds of total voting power credited.
pub fn verify_finalization_quorum(
    validators: &[Validator],
    digest: &[u8; 32],
    proof: &[TypedSignature],
) -> Result<(), HeaderError> {
    let total: u128 = validators.iter().map(|v| v.voting_power as u128).sum();

    let mut voted: u128 = 0;
    for (entry, validator) in proof.iter().zip(validators.iter()) {
        if pk_to_address(&entry.signer) == recover(digest, &entry.signature) {
            voted += validator.voting_power as u128;
        }
    }

    if voted * 3 > total * 2 {
        Ok(())
    } else {
        Err(HeaderError::InsufficientQuorum { voted, total })
    }
}
