/// Discriminates which `ExecutionPayload` schema a transaction carries.
/// Determined from the length-tag at transaction offset 73 (§4.1, §4.6).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadKind {
    Fungible,
    NonFungible,
}

impl PayloadKind {
    /// The wire tag values the upstream transaction encoder uses.
    pub const FUNGIBLE_TAG: u64 = 25;
    pub const NON_FUNGIBLE_TAG: u64 = 26;

    pub fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            Self::FUNGIBLE_TAG => Some(Self::Fungible),
            Self::NON_FUNGIBLE_TAG => Some(Self::NonFungible),
            _ => None,
        }
    }
}

/// A fungible asset release directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FungibleTransfer {
    pub contract_sequence: u128,
    pub amount: u128,
    pub chain: Vec<u8>,
    pub token_address: [u8; 20],
    pub receiver_address: [u8; 20],
}

/// A non-fungible asset release directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonFungibleTransfer {
    pub contract_sequence: u128,
    pub token_id: u128,
    pub chain: Vec<u8>,
    pub collection_address: [u8; 20],
    pub receiver_address: [u8; 20],
}

/// The decoded intent carried by a committed transaction.
///
/// A tagged sum, not a base class — dispatch on it is always a `match`, never
/// runtime type introspection (§9 Design Notes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionPayload {
    Fungible(FungibleTransfer),
    NonFungible(NonFungibleTransfer),
}

impl ExecutionPayload {
    pub fn contract_sequence(&self) -> u128 {
        match self {
            Self::Fungible(f) => f.contract_sequence,
            Self::NonFungible(nf) => nf.contract_sequence,
        }
    }

    pub fn chain(&self) -> &[u8] {
        match self {
            Self::Fungible(f) => &f.chain,
            Self::NonFungible(nf) => &nf.chain,
        }
    }
}
