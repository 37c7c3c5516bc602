//! Chunked file streaming with pluggable transforms and sinks.
//!
//! Every byte-moving operation of the shell (display, copy, hash,
//! compress, decompress) is a [`pipe`] from a [`ChunkReader`] through a
//! [`ChunkTransform`] into a [`ChunkSink`]. Files are never read whole.

mod codec;
mod hash;
mod stream;

pub use codec::{
    COMPRESSED_SUFFIX, GzipDecode, GzipEncode, compress_file, compressed_name, decompress_file,
    decompressed_name,
};
pub use hash::{DigestSink, checksum_bytes, hash_file};
pub use stream::{
    ChunkReader, ChunkSink, ChunkTransform, FileSink, Identity, WriterSink, copy_file, pipe,
    stream_to,
};

/// Default chunk size: 64 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("codec error: {0}")]
    Codec(std::io::Error),

    #[error("missing .gz suffix: {0}")]
    MissingSuffix(String),
}
