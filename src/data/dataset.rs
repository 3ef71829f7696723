use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One fully encoded training example: fixed-length token ids and
/// attention mask plus the label index into the sorted Category Set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProverbSample {
    pub input_ids:      Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub label:          usize,
}

pub struct ProverbDataset {
    samples: Vec<ProverbSample>,
}

impl ProverbDataset {
    pub fn new(samples: Vec<ProverbSample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<ProverbSample> for ProverbDataset {
    fn get(&self, index: usize) -> Option<ProverbSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
