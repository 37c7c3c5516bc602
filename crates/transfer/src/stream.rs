use std::borrow::Cow;
use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{DEFAULT_CHUNK_SIZE, TransferError};

// ---------------------------------------------------------------------------
// ChunkReader
// ---------------------------------------------------------------------------

/// Reads a file in bounded chunks, reusing one buffer for the whole file.
pub struct ChunkReader {
    file: tokio::fs::File,
    buf: Vec<u8>,
    offset: u64,
}

impl ChunkReader {
    /// Opens `path` for chunked reading.
    ///
    /// If `chunk_size` is 0, [`DEFAULT_CHUNK_SIZE`] (64 KiB) is used.
    pub async fn open(path: &Path, chunk_size: usize) -> Result<Self, TransferError> {
        let file = tokio::fs::File::open(path).await?;
        let chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        Ok(Self {
            file,
            buf: vec![0u8; chunk_size],
            offset: 0,
        })
    }

    /// Reads the next chunk. Returns `None` at end-of-data.
    pub async fn next_chunk(&mut self) -> Result<Option<&[u8]>, TransferError> {
        let n = read_some(&mut self.file, &mut self.buf).await?;
        if n == 0 {
            return Ok(None);
        }
        self.offset += n as u64;
        Ok(Some(&self.buf[..n]))
    }

    /// Bytes read so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Configured chunk size.
    pub fn chunk_size(&self) -> usize {
        self.buf.len()
    }
}

async fn read_some<R: AsyncRead + Unpin>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    loop {
        match reader.read(buf).await {
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

/// A per-chunk byte transformation inserted between reader and sink.
pub trait ChunkTransform {
    /// Transforms one chunk. May return an empty buffer when the transform
    /// is still accumulating input.
    fn apply<'a>(&mut self, chunk: &'a [u8]) -> Result<Cow<'a, [u8]>, TransferError>;

    /// Emits whatever the transform still holds once the source is drained.
    fn finish(&mut self) -> Result<Vec<u8>, TransferError> {
        Ok(Vec::new())
    }
}

/// Passes chunks through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl ChunkTransform for Identity {
    fn apply<'a>(&mut self, chunk: &'a [u8]) -> Result<Cow<'a, [u8]>, TransferError> {
        Ok(Cow::Borrowed(chunk))
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Destination of a chunk stream.
#[allow(async_fn_in_trait)]
pub trait ChunkSink {
    /// Accepts one chunk. Chunks arrive in source order.
    async fn accept(&mut self, chunk: &[u8]) -> Result<(), TransferError>;

    /// Called once after the last chunk; the transfer completes only after
    /// this returns.
    async fn finish(&mut self) -> Result<(), TransferError>;
}

/// Forwards chunks to any async writer (console, in-memory buffer).
pub struct WriterSink<'w, W> {
    writer: &'w mut W,
}

impl<'w, W: AsyncWrite + Unpin> WriterSink<'w, W> {
    pub fn new(writer: &'w mut W) -> Self {
        Self { writer }
    }
}

impl<W: AsyncWrite + Unpin> ChunkSink for WriterSink<'_, W> {
    async fn accept(&mut self, chunk: &[u8]) -> Result<(), TransferError> {
        self.writer.write_all(chunk).await?;
        Ok(())
    }

    async fn finish(&mut self) -> Result<(), TransferError> {
        self.writer.flush().await?;
        Ok(())
    }
}

/// Writes chunks to a newly created file.
pub struct FileSink {
    file: tokio::fs::File,
}

impl FileSink {
    /// Creates `path` exclusively; fails with `AlreadyExists` rather than
    /// truncating an existing file.
    pub async fn create_new(path: &Path) -> Result<Self, TransferError> {
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        Ok(Self { file })
    }
}

impl ChunkSink for FileSink {
    async fn accept(&mut self, chunk: &[u8]) -> Result<(), TransferError> {
        self.file.write_all(chunk).await?;
        Ok(())
    }

    async fn finish(&mut self) -> Result<(), TransferError> {
        self.file.flush().await?;
        self.file.sync_all().await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pump
// ---------------------------------------------------------------------------

/// Drains `reader` through `transform` into `sink`.
///
/// Chunk *n* reaches the sink only after chunk *n-1* was accepted. Any
/// error aborts the transfer; output already written is left in place.
/// Returns the number of source bytes consumed.
pub async fn pipe<T, S>(
    reader: &mut ChunkReader,
    transform: &mut T,
    sink: &mut S,
) -> Result<u64, TransferError>
where
    T: ChunkTransform,
    S: ChunkSink,
{
    while let Some(chunk) = reader.next_chunk().await? {
        let out = transform.apply(chunk)?;
        if !out.is_empty() {
            sink.accept(&out).await?;
        }
    }

    let tail = transform.finish()?;
    if !tail.is_empty() {
        sink.accept(&tail).await?;
    }
    sink.finish().await?;

    Ok(reader.offset())
}

/// Streams the content of `source` into `writer` unchanged.
pub async fn stream_to<W>(source: &Path, writer: &mut W, chunk_size: usize) -> Result<u64, TransferError>
where
    W: AsyncWrite + Unpin,
{
    let mut reader = ChunkReader::open(source, chunk_size).await?;
    let mut sink = WriterSink::new(writer);
    pipe(&mut reader, &mut Identity, &mut sink).await
}

/// Copies `source` to the new file `dest`.
///
/// The source is opened before the destination is created, so a missing
/// source never leaves an empty destination behind.
pub async fn copy_file(source: &Path, dest: &Path, chunk_size: usize) -> Result<u64, TransferError> {
    let mut reader = ChunkReader::open(source, chunk_size).await?;
    let mut sink = FileSink::create_new(dest).await?;
    let copied = pipe(&mut reader, &mut Identity, &mut sink).await?;
    tracing::debug!(src = %source.display(), dst = %dest.display(), bytes = copied, "copied file");
    Ok(copied)
}
