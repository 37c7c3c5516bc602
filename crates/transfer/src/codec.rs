//! Gzip compression and decompression on top of the chunk pump.
//!
//! The codecs write into a `Vec<u8>` which is drained after every chunk,
//! so memory use stays bounded by the chunk size plus codec state.

use std::borrow::Cow;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::{GzDecoder, GzEncoder};

use crate::TransferError;
use crate::stream::{ChunkReader, ChunkTransform, FileSink, pipe};

/// Suffix appended by [`compress_file`] and stripped by [`decompress_file`].
pub const COMPRESSED_SUFFIX: &str = ".gz";

/// Gzip-encodes chunks.
pub struct GzipEncode {
    encoder: GzEncoder<Vec<u8>>,
}

impl Default for GzipEncode {
    fn default() -> Self {
        Self::new()
    }
}

impl GzipEncode {
    pub fn new() -> Self {
        Self {
            encoder: GzEncoder::new(Vec::new(), Compression::default()),
        }
    }
}

impl ChunkTransform for GzipEncode {
    fn apply<'a>(&mut self, chunk: &'a [u8]) -> Result<Cow<'a, [u8]>, TransferError> {
        self.encoder.write_all(chunk).map_err(TransferError::Codec)?;
        Ok(Cow::Owned(std::mem::take(self.encoder.get_mut())))
    }

    fn finish(&mut self) -> Result<Vec<u8>, TransferError> {
        self.encoder.try_finish().map_err(TransferError::Codec)?;
        Ok(std::mem::take(self.encoder.get_mut()))
    }
}

/// Gzip-decodes chunks. Fails with [`TransferError::Codec`] on input that
/// is not a valid gzip stream.
pub struct GzipDecode {
    decoder: GzDecoder<Vec<u8>>,
}

impl Default for GzipDecode {
    fn default() -> Self {
        Self::new()
    }
}

impl GzipDecode {
    pub fn new() -> Self {
        Self {
            decoder: GzDecoder::new(Vec::new()),
        }
    }
}

impl ChunkTransform for GzipDecode {
    fn apply<'a>(&mut self, chunk: &'a [u8]) -> Result<Cow<'a, [u8]>, TransferError> {
        self.decoder.write_all(chunk).map_err(TransferError::Codec)?;
        Ok(Cow::Owned(std::mem::take(self.decoder.get_mut())))
    }

    fn finish(&mut self) -> Result<Vec<u8>, TransferError> {
        self.decoder.try_finish().map_err(TransferError::Codec)?;
        Ok(std::mem::take(self.decoder.get_mut()))
    }
}

/// Returns `basename(source)` with [`COMPRESSED_SUFFIX`] appended.
pub fn compressed_name(source: &Path) -> Result<OsString, TransferError> {
    let base = source.file_name().ok_or_else(|| no_file_name(source))?;
    let mut name = base.to_os_string();
    name.push(COMPRESSED_SUFFIX);
    Ok(name)
}

/// Returns `basename(source)` with [`COMPRESSED_SUFFIX`] stripped.
pub fn decompressed_name(source: &Path) -> Result<OsString, TransferError> {
    let base = source.file_name().ok_or_else(|| no_file_name(source))?;
    base.to_str()
        .and_then(|name| name.strip_suffix(COMPRESSED_SUFFIX))
        .filter(|stem| !stem.is_empty())
        .map(OsString::from)
        .ok_or_else(|| TransferError::MissingSuffix(source.display().to_string()))
}

fn no_file_name(source: &Path) -> TransferError {
    TransferError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("no file name in {}", source.display()),
    ))
}

/// Compresses `source` into `dest_dir/basename(source).gz`.
///
/// Returns the path of the written file.
pub async fn compress_file(
    source: &Path,
    dest_dir: &Path,
    chunk_size: usize,
) -> Result<PathBuf, TransferError> {
    let dest = dest_dir.join(compressed_name(source)?);
    let mut reader = ChunkReader::open(source, chunk_size).await?;
    let mut sink = FileSink::create_new(&dest).await?;
    let read = pipe(&mut reader, &mut GzipEncode::new(), &mut sink).await?;
    tracing::info!(src = %source.display(), dst = %dest.display(), bytes = read, "compressed file");
    Ok(dest)
}

/// Decompresses `source` (which must end in `.gz`) into
/// `dest_dir/basename(source)` minus the suffix.
pub async fn decompress_file(
    source: &Path,
    dest_dir: &Path,
    chunk_size: usize,
) -> Result<PathBuf, TransferError> {
    let dest = dest_dir.join(decompressed_name(source)?);
    let mut reader = ChunkReader::open(source, chunk_size).await?;
    let mut sink = FileSink::create_new(&dest).await?;
    let read = pipe(&mut reader, &mut GzipDecode::new(), &mut sink).await?;
    tracing::info!(src = %source.display(), dst = %dest.display(), bytes = read, "decompressed file");
    Ok(dest)
}
