//! # FAQ store
//!
//! Pairs the built [`FlatIndex`] with the parallel list of chunk texts.
//! The alignment invariant lives here: the *i*-th vector in the index was
//! embedded from the *i*-th entry in `chunk_texts`, established during the
//! one-time build and never mutated afterward.
//!
//! Retrieval returns `Option<&str>` rather than a sentinel string: `None`
//! means the corpus is empty (or a position fell outside the text list,
//! which only happens if the pair desynchronizes). Callers that need a
//! textual stand-in substitute their own, so a real chunk can never be
//! mistaken for a miss.

use indicatif::ProgressBar;
use std::error::Error;
use tracing::debug;

use crate::embedder::Embedder;
use crate::index::FlatIndex;

/// In-memory session state: a frozen vector index plus the chunk texts it
/// was built from, aligned by position.
pub struct FaqStore {
    index: FlatIndex,
    chunk_texts: Vec<String>,
}

impl FaqStore {
    /// Embed every chunk and freeze the result into a searchable store.
    ///
    /// This is the blocking, one-time build phase; cost is proportional to
    /// the corpus size. A progress bar tracks the embedding pass since a
    /// few hundred chunks take a noticeable moment on CPU.
    ///
    /// # Errors
    /// Propagates embedding failures and dimension mismatches.
    pub fn from_chunks(embedder: &Embedder, chunks: Vec<String>) -> Result<Self, Box<dyn Error>> {
        let mut index = FlatIndex::new(embedder.dimension());

        let bar = ProgressBar::new(chunks.len() as u64);
        for chunk in &chunks {
            let vector = embedder.embed_one(chunk)?;
            index.add(&vector)?;
            bar.inc(1);
        }
        bar.finish_and_clear();

        index.build();
        debug!("FAQ store built: {} chunks indexed", index.len());

        Ok(Self {
            index,
            chunk_texts: chunks,
        })
    }

    /// Build a store from precomputed embeddings.
    ///
    /// `vectors[i]` must be the embedding of `chunk_texts[i]`; the two
    /// sequences must have equal length.
    pub fn from_vectors(
        dimension: usize,
        vectors: Vec<Vec<f32>>,
        chunk_texts: Vec<String>,
    ) -> Result<Self, &'static str> {
        if vectors.len() != chunk_texts.len() {
            return Err("vector/text length mismatch");
        }
        let mut index = FlatIndex::new(dimension);
        for vector in &vectors {
            index.add(vector)?;
        }
        index.build();
        Ok(Self { index, chunk_texts })
    }

    /// Return the text of the chunk nearest to `query_vector`, or `None`
    /// when the store is empty.
    ///
    /// No relevance threshold is applied: the closest chunk is returned
    /// however large its distance. An unrelated query still gets a
    /// best-effort match, which mirrors the reference behavior of this bot
    /// rather than guaranteeing an accurate answer.
    ///
    /// # Errors
    /// `"dimension mismatch"` if the query vector length differs from the
    /// index dimensionality.
    pub fn retrieve(&self, query_vector: &[f32]) -> Result<Option<&str>, &'static str> {
        let hits = self.index.search(query_vector, 1)?;
        Ok(hits
            .first()
            .and_then(|&(_, position)| self.chunk_texts.get(position))
            .map(String::as_str))
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the store holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
