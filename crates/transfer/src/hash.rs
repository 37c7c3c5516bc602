use std::path::Path;

use sha2::{Digest, Sha256};

use crate::TransferError;
use crate::stream::{ChunkReader, ChunkSink, Identity, pipe};

/// Computes SHA-256 of `data` and returns the hex-encoded digest.
pub fn checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Folds every chunk into a SHA-256 accumulator.
#[derive(Default)]
pub struct DigestSink {
    hasher: Sha256,
}

impl DigestSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalizes the accumulator and returns the hex digest.
    pub fn hex_digest(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

impl ChunkSink for DigestSink {
    async fn accept(&mut self, chunk: &[u8]) -> Result<(), TransferError> {
        self.hasher.update(chunk);
        Ok(())
    }

    async fn finish(&mut self) -> Result<(), TransferError> {
        Ok(())
    }
}

/// Computes SHA-256 of an entire file and returns the hex-encoded digest.
pub async fn hash_file(path: &Path, chunk_size: usize) -> Result<String, TransferError> {
    let mut reader = ChunkReader::open(path, chunk_size).await?;
    let mut sink = DigestSink::new();
    pipe(&mut reader, &mut Identity, &mut sink).await?;
    Ok(sink.hex_digest())
}
