//! # Sentence embeddings
//!
//! Embeds text into fixed-dimension vectors with the
//! `sentence-transformers/all-MiniLM-L6-v2` BERT model, run locally through
//! Candle (pure Rust ML framework). Model files are fetched from the
//! Hugging Face Hub on first use and cached.
//!
//! The model is loaded **once** at startup and owned explicitly by the
//! caller; components that embed text borrow the [`Embedder`] rather than
//! reaching for global state. Encoding is deterministic for a fixed model
//! artifact: the same text always produces the same vector.
//!
//! Pipeline per text: tokenize (truncated at 512 tokens), run BERT, mean
//! pool token embeddings under the attention mask, then L2 normalize.

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use hf_hub::{Repo, RepoType, api::sync::Api};
use std::error::Error;
use tokenizers::Tokenizer;
use tracing::debug;

/// Hugging Face model identifier for the embedding model.
pub const EMBEDDING_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Sentence embedding model using Candle.
pub struct Embedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dimension: usize,
}

impl Embedder {
    /// Load the model from the Hugging Face Hub (cached after first download).
    ///
    /// # Errors
    /// Fails if the model files cannot be fetched or parsed. This is a fatal
    /// startup error; nothing in the pipeline works without the model.
    pub fn load() -> Result<Self, Box<dyn Error>> {
        let device = Device::Cpu;
        let revision = "main";

        let repo = Repo::with_revision(
            EMBEDDING_MODEL_ID.to_string(),
            RepoType::Model,
            revision.to_string(),
        );
        let api = Api::new()?;
        let api_repo = api.repo(repo);

        let config_filename = api_repo.get("config.json")?;
        let tokenizer_filename = api_repo.get("tokenizer.json")?;
        let weights_filename = api_repo.get("model.safetensors")?;

        let config = std::fs::read_to_string(config_filename)?;
        let config: Config = serde_json::from_str(&config)?;
        let dimension = config.hidden_size;

        let tokenizer = Tokenizer::from_file(tokenizer_filename)
            .map_err(|e| format!("Failed to load tokenizer: {}", e))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_filename], DTYPE, &device)? };
        let model = BertModel::load(vb, &config)?;

        debug!("Embedding model loaded ({dimension} dimensions)");

        Ok(Self {
            model,
            tokenizer,
            device,
            dimension,
        })
    }

    /// Dimensionality of the vectors this model produces (384 for MiniLM-L6).
    ///
    /// Constant for the lifetime of the process; every vector fed into one
    /// index must have this length.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed a batch of texts, preserving length and order.
    ///
    /// Empty strings still embed, but their vectors carry whatever meaning
    /// the model assigns them.
    pub fn embed<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<f32>>, Box<dyn Error>> {
        texts.iter().map(|text| self.embed_one(text.as_ref())).collect()
    }

    /// Embed a single text (a batch of one), e.g. an incoming user query.
    pub fn embed_one(&self, text: &str) -> Result<Vec<f32>, Box<dyn Error>> {
        // Tokenize with automatic truncation at 512 tokens
        let tokens = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| format!("Tokenization error: {}", e))?;

        let token_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(tokens.get_type_ids(), &self.device)?.unsqueeze(0)?;

        let output = self.model.forward(&token_ids, &token_type_ids, None)?;

        let embedding = self.mean_pooling(&output, tokens.get_attention_mask())?;
        let embedding = self.normalize(&embedding)?;

        Ok(embedding.to_vec1::<f32>()?)
    }

    /// Mean pooling over token embeddings, weighted by the attention mask.
    fn mean_pooling(
        &self,
        embeddings: &Tensor,
        attention_mask: &[u32],
    ) -> Result<Tensor, Box<dyn Error>> {
        // embeddings: [1, seq_len, hidden]; mask broadcast as [1, seq_len, 1]
        let mask = Tensor::new(attention_mask, &self.device)?
            .to_dtype(DType::F32)?
            .unsqueeze(0)?
            .unsqueeze(2)?;

        let masked = embeddings.broadcast_mul(&mask)?;
        let sum = masked.sum(1)?;
        let count = mask.sum(1)?.clamp(1f32, f32::INFINITY)?;
        let mean = sum.broadcast_div(&count)?;

        Ok(mean.squeeze(0)?)
    }

    /// L2 normalize the pooled embedding.
    fn normalize(&self, tensor: &Tensor) -> Result<Tensor, Box<dyn Error>> {
        let norm = tensor.sqr()?.sum_all()?.sqrt()?;
        Ok(tensor.broadcast_div(&norm)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Requires the model files; run with `cargo test -- --ignored` when the
    // Hugging Face cache is available.
    #[test]
    #[ignore = "downloads the embedding model"]
    fn test_embedding_is_deterministic() -> Result<(), Box<dyn Error>> {
        let embedder = Embedder::load()?;
        let a = embedder.embed_one("Refunds are processed within 5 business days.")?;
        let b = embedder.embed_one("Refunds are processed within 5 business days.")?;
        assert_eq!(a.len(), embedder.dimension());
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    #[ignore = "downloads the embedding model"]
    fn test_batch_preserves_length_and_order() -> Result<(), Box<dyn Error>> {
        let embedder = Embedder::load()?;
        let texts = ["Deliveries take two days.", "We accept card payments."];
        let vectors = embedder.embed(&texts)?;
        assert_eq!(vectors.len(), texts.len());
        assert_eq!(vectors[0], embedder.embed_one(texts[0])?);
        Ok(())
    }
}
