// ============================================================
// Layer 4 — Proverb Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<ProverbSample>
// into tensors the model forward pass consumes:
//
//   Input:  N samples, each with sequences of length S
//   Output: input_ids / attention_mask of shape [N, S],
//           labels of shape [N]
//
// All sequences are pre-padded to the same length by the
// TextEncoder, so stacking is a flatten + reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::ProverbSample;

/// A batch of encoded proverbs ready for the model.
#[derive(Debug, Clone)]
pub struct ProverbBatch<B: Backend> {
    /// Token id sequences — shape [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// 1 = real token, 0 = padding — shape [batch_size, seq_len]
    pub attention_mask: Tensor<B, 2, Int>,

    /// Ground truth label indices — shape [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

/// Holds the target device so tensors land on the right backend.
#[derive(Clone, Debug)]
pub struct ProverbBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ProverbBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<ProverbSample, ProverbBatch<B>> for ProverbBatcher<B> {
    fn batch(&self, items: Vec<ProverbSample>) -> ProverbBatch<B> {
        let batch_size = items.len();
        // All sequences share one length (pre-padded by the encoder)
        let seq_len = items[0].input_ids.len();

        let ids_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
            .collect();

        let mask_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.attention_mask.iter().map(|&x| x as i32))
            .collect();

        let labels: Vec<i32> = items.iter().map(|s| s.label as i32).collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(ids_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let attention_mask = Tensor::<B, 1, Int>::from_ints(mask_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        ProverbBatch { input_ids, attention_mask, labels }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_batch_shapes() {
        let device = Default::default();
        let batcher = ProverbBatcher::<TestBackend>::new(device);

        let items = vec![
            ProverbSample { input_ids: vec![101, 5, 102, 0], attention_mask: vec![1, 1, 1, 0], label: 0 },
            ProverbSample { input_ids: vec![101, 7, 102, 0], attention_mask: vec![1, 1, 1, 0], label: 2 },
        ];
        let batch = batcher.batch(items);

        assert_eq!(batch.input_ids.dims(), [2, 4]);
        assert_eq!(batch.attention_mask.dims(), [2, 4]);
        assert_eq!(batch.labels.dims(), [2]);
    }
}
