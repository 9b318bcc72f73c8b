use super::CodecError;

/// A forward-only reader over a byte slice that never panics.
///
/// Every `BlockHeader`/`FinalizationProof`/`ExecutionPayload` decoder is
/// built on top of this cursor so the "total on well-formed input" contract
/// (§4.1) holds without any decoder needing its own bounds-checking.
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn take(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::Truncated {
                context,
                needed: n,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], CodecError> {
        let slice = self.take(N, context)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub fn read_u8(&mut self, context: &'static str) -> Result<u8, CodecError> {
        Ok(self.read_array::<1>(context)?[0])
    }

    pub fn read_u64_le(&mut self, context: &'static str) -> Result<u64, CodecError> {
        Ok(u64::from_le_bytes(self.read_array::<8>(context)?))
    }

    pub fn read_i64_le(&mut self, context: &'static str) -> Result<i64, CodecError> {
        Ok(i64::from_le_bytes(self.read_array::<8>(context)?))
    }

    pub fn read_u128_le(&mut self, context: &'static str) -> Result<u128, CodecError> {
        Ok(u128::from_le_bytes(self.read_array::<16>(context)?))
    }

    pub fn read_vec(&mut self, n: usize, context: &'static str) -> Result<Vec<u8>, CodecError> {
        Ok(self.take(n, context)?.to_vec())
    }

    /// Consume the cursor, requiring that every byte of the original input
    /// was read — used where the spec requires an exact-length match
    /// (e.g. the standalone finalization-proof blob, §4.1).
    pub fn finish(self, context: &'static str) -> Result<(), CodecError> {
        if self.remaining() != 0 {
            return Err(CodecError::LengthMismatch {
                context,
                expected: self.pos,
                got: self.pos + self.remaining(),
            });
        }
        Ok(())
    }
}
