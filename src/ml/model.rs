use burn::{
    nn::{
        attention::{MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::backend::AutodiffBackend,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ProverbClassifierConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
    pub num_classes: usize,
    pub dropout:     f64,
}

impl ProverbClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ProverbClassifier<B> {
        let token_embedding    = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let position_embedding = EmbeddingConfig::new(self.max_seq_len, self.d_model).init(device);
        let layers: Vec<EncoderBlock<B>> = (0..self.num_layers)
            .map(|_| self.build_encoder_block(device))
            .collect();
        let final_norm = LayerNormConfig::new(self.d_model).init(device);
        let class_head = LinearConfig::new(self.d_model, self.num_classes).init(device);
        let dropout    = DropoutConfig::new(self.dropout).init();
        ProverbClassifier {
            token_embedding, position_embedding, layers,
            final_norm, class_head, dropout,
            max_seq_len: self.max_seq_len,
            d_model:     self.d_model,
        }
    }

    fn build_encoder_block<B: Backend>(&self, device: &B::Device) -> EncoderBlock<B> {
        let self_attn   = MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
            .with_dropout(self.dropout)
            .init(device);
        let ffn_linear1 = LinearConfig::new(self.d_model, self.d_ff).init(device);
        let ffn_linear2 = LinearConfig::new(self.d_ff, self.d_model).init(device);
        let norm1   = LayerNormConfig::new(self.d_model).init(device);
        let norm2   = LayerNormConfig::new(self.d_model).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        EncoderBlock { self_attn, ffn_linear1, ffn_linear2, norm1, norm2, dropout }
    }
}

#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    pub self_attn:   MultiHeadAttention<B>,
    pub ffn_linear1: Linear<B>,
    pub ffn_linear2: Linear<B>,
    pub norm1:       LayerNorm<B>,
    pub norm2:       LayerNorm<B>,
    pub dropout:     Dropout,
}

impl<B: Backend> EncoderBlock<B> {
    pub fn forward(&self, x: Tensor<B, 3>, pad_mask: Tensor<B, 2, Bool>) -> Tensor<B, 3> {
        use burn::nn::attention::MhaInput;
        let attn_input  = MhaInput::self_attn(x.clone()).mask_pad(pad_mask);
        let attn_output = self.self_attn.forward(attn_input).context;
        let x = self.norm1.forward(x + self.dropout.forward(attn_output));
        let ffn_out = self.ffn_linear2.forward(
            burn::tensor::activation::gelu(self.ffn_linear1.forward(x.clone()))
        );
        self.norm2.forward(x + self.dropout.forward(ffn_out))
    }
}

/// Transformer encoder with a linear classification head over the
/// current Category Set, pooled at the [CLS] position.
#[derive(Module, Debug)]
pub struct ProverbClassifier<B: Backend> {
    pub token_embedding:    Embedding<B>,
    pub position_embedding: Embedding<B>,
    pub layers:             Vec<EncoderBlock<B>>,
    pub final_norm:         LayerNorm<B>,
    pub class_head:         Linear<B>,
    pub dropout:            Dropout,
    pub max_seq_len:        usize,
    pub d_model:            usize,
}

impl<B: Backend> ProverbClassifier<B> {
    /// input_ids, attention_mask: [batch, seq_len] → logits: [batch, num_classes]
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> Tensor<B, 2> {
        let [batch_size, seq_len] = input_ids.dims();
        let d_model = self.d_model;

        let tok_emb = self.token_embedding.forward(input_ids);

        // Self-attention is permutation-invariant, so position must be injected explicitly.
        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &tok_emb.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let pos_emb = self.position_embedding.forward(positions);

        // mask_pad marks the positions attention must ignore: the padding
        let pad_mask = attention_mask.equal_elem(0);

        let mut x = self.dropout.forward(tok_emb + pos_emb);
        for layer in &self.layers {
            x = layer.forward(x, pad_mask.clone());
        }
        let x = self.final_norm.forward(x); // [batch, seq_len, d_model]

        // Pool the [CLS] position (index 0) and project onto the categories.
        let cls = x
            .slice([0..batch_size, 0..1, 0..d_model])
            .reshape([batch_size, d_model]);

        self.class_head.forward(cls) // [batch, num_classes]
    }

    /// Forward pass plus scalar cross-entropy loss for training.
    pub fn forward_loss(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
        labels:         Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>)
    where
        B: AutodiffBackend,
    {
        let logits = self.forward(input_ids, attention_mask);
        let ce = burn::nn::loss::CrossEntropyLossConfig::new()
            .init(&logits.device());
        let loss = ce.forward(logits.clone(), labels);
        (loss, logits)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn tiny_config(num_classes: usize) -> ProverbClassifierConfig {
        ProverbClassifierConfig::new(200, 16, 32, 4, 1, 64, num_classes, 0.0)
    }

    #[test]
    fn test_logits_cover_the_category_set() {
        let device = Default::default();
        let model = tiny_config(3).init::<TestBackend>(&device);

        let ids: Vec<i32>  = vec![101, 110, 111, 102, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mask: Vec<i32> = vec![1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

        let input_ids = Tensor::<TestBackend, 1, Int>::from_ints(ids.as_slice(), &device)
            .reshape([1, 16]);
        let attention_mask = Tensor::<TestBackend, 1, Int>::from_ints(mask.as_slice(), &device)
            .reshape([1, 16]);

        let logits = model.forward(input_ids, attention_mask);
        assert_eq!(logits.dims(), [1, 3]);
    }

    #[test]
    fn test_head_size_follows_category_count() {
        let device = Default::default();
        let model = tiny_config(7).init::<TestBackend>(&device);
        assert_eq!(model.class_head.weight.val().dims(), [32, 7]);
    }
}
