//! # Custodian Core
//!
//! Pure Rust verification engine for a BFT light client and the
//! cross-chain withdrawal authority it backs.
//!
//! This crate contains **no networking code** and **no host bindings**. It
//! is the deterministic heart of the system: every header and every
//! withdrawal transaction passes through these verification functions
//! before any asset moves.
//!
//! ## Trust Model
//!
//! - **Header validation** (`header` module): verifies a quorum-signed
//!   finalization proof against the validator set named in the previously
//!   accepted header. Trusts that more than two-thirds of voting power is
//!   honest — the same assumption the upstream BFT consensus itself makes.
//!
//! - **Withdrawal dispatch** (`withdrawal` module): verifies a transaction's
//!   commit Merkle proof and its embedded execution-hash envelope. Zero
//!   trust assumptions beyond the commit root already accepted into
//!   `LightClientState`.
//!
//! Both trust boundaries terminate at this crate: networking, transaction
//! replay protection, and asset custody itself live on the other side of
//! the `host` module's traits.
//!
//! ## Usage
//!
//! ```ignore
//! use custodian_core::header::advance;
//! use custodian_core::withdrawal::execute;
//! use custodian_core::state::LightClientState;
//! ```

pub mod codec;
pub mod crypto;
pub mod header;
pub mod host;
pub mod merkle;
pub mod state;
pub mod types;
pub mod withdrawal;

pub use header::{advance, HeaderError};
pub use host::{AssetLedger, Event, HostHooks};
pub use merkle::{verify_commitment, MerkleError};
pub use state::LightClientState;
pub use types::{header::*, payload::*};
pub use withdrawal::{execute, ExecutionError};
