//! The chunk module splits long text into overlapping, size-bounded windows
//! so it can be fed to a model piece by piece.

use anyhow::{Result, bail};

use crate::constants::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

/// A contiguous piece of a source text.
///
/// Offsets are counted in characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of the chunk in the sequence (0-based)
    pub index: usize,
    /// Character offset where the chunk starts in the source text
    pub start: usize,
    /// Character offset one past the chunk end in the source text
    pub end: usize,
    /// The chunk content
    pub text: String,
}

/// Splits text into windows of at most `chunk_size` characters, each
/// sharing its first `chunk_overlap` characters with the tail of the
/// previous window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl Chunker {
    /// Creates a chunker with the given window size and overlap.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * `chunk_size` is zero
    /// * `chunk_overlap` is not smaller than `chunk_size`, which would stop
    ///   the window from advancing
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            bail!("Chunk size must be positive");
        }
        if chunk_overlap >= chunk_size {
            bail!("Chunk overlap ({chunk_overlap}) must be smaller than chunk size ({chunk_size})");
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Splits `text` into ordered, overlapping chunks.
    ///
    /// Text no longer than `chunk_size` comes back as a single chunk,
    /// the empty text included.
    pub fn chunks(&self, text: &str) -> Vec<Chunk> {
        // Byte offset of every char boundary, plus the end of the text.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let length = boundaries.len() - 1;
        let step = self.chunk_size - self.chunk_overlap;

        let mut chunks = Vec::with_capacity(length.div_ceil(step).max(1));
        let mut start = 0;

        loop {
            let end = (start + self.chunk_size).min(length);
            let slice = match (boundaries.get(start), boundaries.get(end)) {
                (Some(&from), Some(&to)) => text.get(from..to).unwrap_or_default(),
                _ => break,
            };

            chunks.push(Chunk {
                index: chunks.len(),
                start,
                end,
                text: slice.to_owned(),
            });

            if end >= length {
                break;
            }
            start += step;
        }

        chunks
    }

    /// Same as [`Chunker::chunks`], keeping only the chunk contents.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.chunks(text)
            .into_iter()
            .map(|chunk| chunk.text)
            .collect()
    }
}
