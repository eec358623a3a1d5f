use anyhow::{bail, ensure, Result};
use burn::data::dataset::Dataset;
use ndarray::Array2;

use crate::domain::{sample::TextSample, traits::SampleSource};

/// Paired feature/label arrays, one row per sample.
/// Immutable once built; rows are materialised into `TextSample`s on access.
#[derive(Debug, Clone)]
pub struct TextDataset {
    features: Array2<i64>,
    labels:   Array2<f32>,
}

impl TextDataset {
    pub fn new(features: Array2<i64>, labels: Array2<f32>) -> Result<Self> {
        ensure!(
            features.nrows() == labels.nrows(),
            "feature rows ({}) and label rows ({}) differ",
            features.nrows(),
            labels.nrows()
        );
        Ok(Self { features, labels })
    }

    /// Build from already materialised samples. All samples must share
    /// the same sequence length and label width.
    #[cfg(test)]
    pub fn from_samples(samples: &[TextSample]) -> Result<Self> {
        let seq_len     = samples.first().map_or(0, TextSample::seq_len);
        let num_classes = samples.first().map_or(0, TextSample::num_classes);

        let mut ids    = Vec::with_capacity(samples.len() * seq_len);
        let mut labels = Vec::with_capacity(samples.len() * num_classes);
        for (i, s) in samples.iter().enumerate() {
            ensure!(
                s.seq_len() == seq_len && s.num_classes() == num_classes,
                "sample {i} has shape ({}, {}), expected ({seq_len}, {num_classes})",
                s.seq_len(),
                s.num_classes()
            );
            ids.extend(s.token_ids.iter().map(|&t| i64::from(t)));
            labels.extend_from_slice(&s.label);
        }

        let features = Array2::from_shape_vec((samples.len(), seq_len), ids)?;
        let labels   = Array2::from_shape_vec((samples.len(), num_classes), labels)?;
        Self::new(features, labels)
    }

    /// Width of every token sequence.
    pub fn seq_len(&self) -> usize {
        self.features.ncols()
    }

    /// Width of every label vector.
    pub fn num_classes(&self) -> usize {
        self.labels.ncols()
    }

    /// Smallest and largest token id in the features, if any.
    pub fn token_id_range(&self) -> Option<(i64, i64)> {
        self.features.iter().fold(None, |range, &t| match range {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
    }

    /// Check that every row can go through a network with `num_classes`
    /// outputs and a `vocab_size`-row embedding table. The embedding
    /// gather and the loss both panic on out-of-shape input, so this
    /// must pass before any batch is built.
    pub fn check_fits(&self, num_classes: usize, vocab_size: usize, split: &str) -> Result<()> {
        ensure!(self.length() > 0, "{split} split is empty");
        ensure!(
            self.num_classes() == num_classes,
            "{split} labels have {} columns but the network has {num_classes} classes",
            self.num_classes()
        );
        if let Some((lo, hi)) = self.token_id_range() {
            ensure!(
                lo >= 0 && (hi as u64) < vocab_size as u64,
                "{split} split uses token ids {lo}..={hi}, outside the {vocab_size}-row embedding table"
            );
        }
        Ok(())
    }

    fn row(&self, index: usize) -> TextSample {
        let token_ids = self.features.row(index).iter().map(|&t| t as i32).collect();
        let label     = self.labels.row(index).to_vec();
        TextSample::new(token_ids, label)
    }
}

impl SampleSource for TextDataset {
    fn length(&self) -> usize {
        self.features.nrows()
    }

    fn item_at(&self, index: usize) -> Result<TextSample> {
        if index >= self.length() {
            bail!("index {index} out of range for dataset of {} samples", self.length());
        }
        Ok(self.row(index))
    }
}

impl Dataset<TextSample> for TextDataset {
    fn get(&self, index: usize) -> Option<TextSample> {
        self.item_at(index).ok()
    }

    fn len(&self) -> usize {
        self.features.nrows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn small() -> TextDataset {
        TextDataset::new(
            array![[1i64, 2, 3], [4, 5, 6], [7, 8, 9]],
            array![[1.0f32, 0.0], [0.0, 1.0], [1.0, 0.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_length_matches_rows() {
        let ds = small();
        assert_eq!(ds.length(), 3);
        assert_eq!(Dataset::len(&ds), 3);
        assert_eq!(ds.seq_len(), 3);
        assert_eq!(ds.num_classes(), 2);
    }

    #[test]
    fn test_item_at_returns_row_unchanged() {
        let ds = small();
        let s = ds.item_at(1).unwrap();
        assert_eq!(s.token_ids, vec![4, 5, 6]);
        assert_eq!(s.label, vec![0.0, 1.0]);
        assert_eq!(Dataset::get(&ds, 1), Some(s));
    }

    #[test]
    fn test_item_at_out_of_range() {
        let ds = small();
        assert!(ds.item_at(3).is_err());
        assert!(Dataset::get(&ds, 3).is_none());
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let res = TextDataset::new(array![[1i64, 2], [3, 4]], array![[1.0f32, 0.0]]);
        assert!(res.is_err());
    }

    #[test]
    fn test_from_samples_round_trips_items() {
        let samples = vec![
            TextSample::new(vec![3, 1], vec![0.0, 1.0, 0.0]),
            TextSample::new(vec![0, 9], vec![1.0, 0.0, 0.0]),
        ];
        let ds = TextDataset::from_samples(&samples).unwrap();
        assert_eq!(ds.length(), 2);
        assert_eq!(ds.item_at(0).unwrap(), samples[0]);
        assert_eq!(ds.item_at(1).unwrap(), samples[1]);
        assert_eq!(ds.token_id_range(), Some((0, 9)));
    }

    #[test]
    fn test_from_samples_rejects_ragged_rows() {
        let samples = vec![
            TextSample::new(vec![1, 2, 3], vec![1.0, 0.0]),
            TextSample::new(vec![1, 2], vec![1.0, 0.0]),
        ];
        assert!(TextDataset::from_samples(&samples).is_err());
    }

    #[test]
    fn test_check_fits_accepts_matching_split() {
        assert!(small().check_fits(2, 10, "test").is_ok());
    }

    #[test]
    fn test_check_fits_rejects_label_width() {
        let err = small().check_fits(4, 10, "test").unwrap_err();
        assert!(err.to_string().contains("2 columns"), "{err}");
    }

    #[test]
    fn test_check_fits_rejects_id_past_table() {
        // largest id is 9, so a 9-row table is one short
        assert!(small().check_fits(2, 9, "test").is_err());
    }

    #[test]
    fn test_check_fits_rejects_negative_id() {
        let ds = TextDataset::new(
            array![[5i64, 5, 5], [5, -1, 5]],
            array![[1.0f32, 0.0], [0.0, 1.0]],
        )
        .unwrap();
        assert_eq!(ds.token_id_range(), Some((-1, 5)));
        assert!(ds.check_fits(2, 10, "train").is_err());
    }

    #[test]
    fn test_check_fits_rejects_empty_split() {
        let ds = TextDataset::new(Array2::zeros((0, 3)), Array2::zeros((0, 2))).unwrap();
        assert_eq!(ds.token_id_range(), None);
        assert!(ds.check_fits(2, 10, "test").is_err());
    }
}
