//! `LightClientState` (§3): the durable record a host keeps between calls
//! into this engine.
//!
//! The state is deliberately thin — the last accepted header's raw bytes
//! plus the commit roots seen since genesis. Everything else (quorum
//! verification, transition rules) is recomputed from scratch on every
//! `HeaderValidator::advance` call rather than cached.

use crate::codec::{decode_block_header, CodecError};

/// Tracks the chain of finalized headers for one remote chain.
///
/// `commit_roots[i]` is the commit Merkle root of the header at height
/// `height_offset + i`; `current_height()` is always `height_offset +
/// commit_roots.len() - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightClientState {
    height_offset: u64,
    last_header: Vec<u8>,
    commit_roots: Vec<[u8; 32]>,
    chain_name: Vec<u8>,
}

impl LightClientState {
    /// Seed a fresh state from a genesis header's raw encoded bytes.
    pub fn new(genesis_header_bytes: &[u8], chain_name: impl Into<Vec<u8>>) -> Result<Self, CodecError> {
        let genesis = decode_block_header(genesis_header_bytes)?;
        Ok(Self {
            height_offset: genesis.block_height,
            last_header: genesis_header_bytes.to_vec(),
            commit_roots: vec![genesis.commit_merkle_root],
            chain_name: chain_name.into(),
        })
    }

    pub fn height_offset(&self) -> u64 {
        self.height_offset
    }

    pub fn last_header(&self) -> &[u8] {
        &self.last_header
    }

    pub fn commit_roots(&self) -> &[[u8; 32]] {
        &self.commit_roots
    }

    pub fn chain_name(&self) -> &[u8] {
        &self.chain_name
    }

    /// The height of the most recently accepted header.
    pub fn current_height(&self) -> u64 {
        self.height_offset + self.commit_roots.len() as u64 - 1
    }

    /// Append a newly-validated header, becoming the new `last_header`.
    ///
    /// Only `header::validator::advance` may call this — every other path
    /// into a state change goes through the checks `advance` performs first.
    pub(crate) fn accept(&mut self, new_header_bytes: Vec<u8>, commit_root: [u8; 32]) {
        self.last_header = new_header_bytes;
        self.commit_roots.push(commit_root);
    }
}
