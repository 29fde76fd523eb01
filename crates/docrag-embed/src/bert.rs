//! MiniLM encoder using Candle.
//!
//! Uses sentence-transformers/all-MiniLM-L6-v2:
//! - 384 dimensions
//! - 512 max tokens
//! - BERT architecture, mean-pooled token embeddings

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use docrag_core::{EncodeError, TextEncoder};

/// Model identifier on HuggingFace Hub.
const MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Embedding dimension for MiniLM-L6-v2.
const EMBEDDING_DIM: usize = 384;

/// Maximum sequence length.
const MAX_TOKENS: usize = 512;

/// Default number of texts encoded per forward pass.
const DEFAULT_BATCH_SIZE: usize = 32;

/// MiniLM text encoder using Candle.
///
/// The tokenizer and model weights are downloaded from the Hub (or taken
/// from the local cache) and loaded once at construction; a load failure is
/// fatal. Inference is stateless, so encoding the same text always yields
/// the same vector.
pub struct BertEncoder {
    device: Device,
    model: BertModel,
    tokenizer: Tokenizer,
    batch_size: usize,
}

impl BertEncoder {
    /// Download (if needed) and load the model, preferring CUDA when available.
    pub fn load() -> Result<Self, EncodeError> {
        let device = Device::cuda_if_available(0).unwrap_or(Device::Cpu);
        Self::load_on(device)
    }

    /// Load the model onto a specific device.
    pub fn load_on(device: Device) -> Result<Self, EncodeError> {
        info!("loading encoder {} on {:?}", MODEL_ID, device);

        let api = Api::new()
            .map_err(|e| EncodeError::ModelLoad(format!("failed to create hub api: {e}")))?;
        let repo = api.repo(Repo::new(MODEL_ID.to_string(), RepoType::Model));

        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| EncodeError::ModelLoad(format!("failed to fetch tokenizer: {e}")))?;
        let config_path = repo
            .get("config.json")
            .map_err(|e| EncodeError::ModelLoad(format!("failed to fetch config: {e}")))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| EncodeError::ModelLoad(format!("failed to fetch weights: {e}")))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| EncodeError::ModelLoad(format!("failed to load tokenizer: {e}")))?;

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| EncodeError::ModelLoad(format!("failed to read config: {e}")))?;
        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| EncodeError::ModelLoad(format!("failed to parse config: {e}")))?;

        // SAFETY: the safetensors file comes from the Hub cache and is only
        // mapped for read access.
        #[allow(unsafe_code)]
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| EncodeError::ModelLoad(format!("failed to map weights: {e}")))?
        };
        let model = BertModel::load(vb, &config)
            .map_err(|e| EncodeError::ModelLoad(format!("failed to build model: {e}")))?;

        info!("encoder ready ({} dims)", EMBEDDING_DIM);
        Ok(Self {
            device,
            model,
            tokenizer,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Override the internal batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Encode one sub-batch of texts.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncodeError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EncodeError::Tokenize(e.to_string()))?;

        // Pad every sequence to the batch maximum, truncated to the model
        // limit.
        let max_len = encodings
            .iter()
            .map(tokenizers::Encoding::len)
            .max()
            .unwrap_or(0)
            .min(MAX_TOKENS);

        let mut input_ids_vec: Vec<u32> = Vec::with_capacity(texts.len() * max_len);
        let mut attention_mask_vec: Vec<u32> = Vec::with_capacity(texts.len() * max_len);
        let mut token_type_ids_vec: Vec<u32> = Vec::with_capacity(texts.len() * max_len);

        for encoding in &encodings {
            let ids = encoding.get_ids();
            let len = ids.len().min(max_len);

            for i in 0..max_len {
                if i < len {
                    input_ids_vec.push(ids[i]);
                    attention_mask_vec.push(1);
                } else {
                    input_ids_vec.push(0);
                    attention_mask_vec.push(0);
                }
                token_type_ids_vec.push(0);
            }
        }

        let batch_size = texts.len();
        let input_ids = Tensor::from_vec(input_ids_vec, (batch_size, max_len), &self.device)
            .map_err(|e| EncodeError::Inference(format!("input_ids tensor: {e}")))?;
        let attention_mask =
            Tensor::from_vec(attention_mask_vec, (batch_size, max_len), &self.device)
                .map_err(|e| EncodeError::Inference(format!("attention_mask tensor: {e}")))?;
        let token_type_ids =
            Tensor::from_vec(token_type_ids_vec, (batch_size, max_len), &self.device)
                .map_err(|e| EncodeError::Inference(format!("token_type_ids tensor: {e}")))?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| EncodeError::Inference(format!("model forward: {e}")))?;

        let pooled = mean_pool(&hidden, &attention_mask)?;

        let mut vectors = Vec::with_capacity(batch_size);
        for i in 0..batch_size {
            let vector = pooled
                .get(i)
                .map_err(|e| EncodeError::Inference(format!("row {i}: {e}")))?
                .to_vec1::<f32>()
                .map_err(|e| EncodeError::Inference(format!("row {i} to vec: {e}")))?;
            vectors.push(vector);
        }

        Ok(vectors)
    }
}

/// Mean-pool token embeddings over the token axis, weighted by the
/// attention mask so padding does not dilute the average.
fn mean_pool(token_embeddings: &Tensor, attention_mask: &Tensor) -> Result<Tensor, EncodeError> {
    let mask = attention_mask
        .unsqueeze(2)
        .map_err(|e| EncodeError::Inference(format!("unsqueeze: {e}")))?
        .broadcast_as(token_embeddings.shape())
        .map_err(|e| EncodeError::Inference(format!("broadcast: {e}")))?
        .to_dtype(DType::F32)
        .map_err(|e| EncodeError::Inference(format!("dtype: {e}")))?;

    let summed = token_embeddings
        .mul(&mask)
        .map_err(|e| EncodeError::Inference(format!("mul: {e}")))?
        .sum(1)
        .map_err(|e| EncodeError::Inference(format!("sum: {e}")))?;

    let counts = mask
        .sum(1)
        .map_err(|e| EncodeError::Inference(format!("mask sum: {e}")))?
        .clamp(1e-9, f64::MAX)
        .map_err(|e| EncodeError::Inference(format!("clamp: {e}")))?;

    summed
        .div(&counts)
        .map_err(|e| EncodeError::Inference(format!("div: {e}")))
}

impl TextEncoder for BertEncoder {
    fn model_name(&self) -> &str {
        MODEL_ID
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIM
    }

    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncodeError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("encoding {} texts", texts.len());

        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            vectors.extend(self.encode_batch(batch)?);
        }

        Ok(vectors)
    }
}
