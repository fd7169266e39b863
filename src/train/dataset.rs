use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

/// One training example: an input vector and the output it should produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSample {
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

impl DataSample {
    pub fn new(inputs: Vec<f64>, targets: Vec<f64>) -> DataSample {
        DataSample { inputs, targets }
    }
}

/// Ordered collection of samples. Order only matters as the basis for batching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    samples: Vec<DataSample>,
}

impl Dataset {
    pub fn new(samples: Vec<DataSample>) -> Dataset {
        Dataset { samples }
    }

    /// Builds a dataset from parallel input/target lists.
    ///
    /// Fails with [`NetworkError::PairCount`] when the lists differ in length.
    pub fn from_pairs(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<Dataset> {
        if inputs.len() != targets.len() {
            return Err(NetworkError::PairCount { inputs: inputs.len(), targets: targets.len() });
        }
        Ok(inputs.iter().zip(targets.iter())
            .map(|(i, t)| DataSample::new(i.clone(), t.clone()))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[DataSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataSample> {
        self.samples.iter()
    }

    pub fn push(&mut self, sample: DataSample) {
        self.samples.push(sample);
    }

    /// Uniform in-place permutation using the thread-local RNG.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.samples.shuffle(rng);
    }

    /// The contiguous slice `[start, start + size)`.
    ///
    /// A negative `start`, a `start` past the end, or a window running past
    /// the end all mean "no more batches" and yield an empty slice.
    pub fn batch(&self, start: isize, size: usize) -> &[DataSample] {
        let Ok(start) = usize::try_from(start) else {
            return &[];
        };
        match start.checked_add(size) {
            Some(end) if start < self.len() && end <= self.len() => &self.samples[start..end],
            _ => &[],
        }
    }

    /// Consecutive batches of `size` samples; the last one may be shorter.
    ///
    /// # Panics
    /// Panics if `size == 0`.
    pub fn batches(&self, size: usize) -> std::slice::Chunks<'_, DataSample> {
        self.samples.chunks(size)
    }
}

impl FromIterator<DataSample> for Dataset {
    fn from_iter<I: IntoIterator<Item = DataSample>>(iter: I) -> Self {
        Dataset { samples: iter.into_iter().collect() }
    }
}

impl From<Vec<DataSample>> for Dataset {
    fn from(samples: Vec<DataSample>) -> Self {
        Dataset { samples }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataSample;
    type IntoIter = std::slice::Iter<'a, DataSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn numbered(n: usize) -> Dataset {
        (0..n).map(|i| DataSample::new(vec![i as f64], vec![i as f64])).collect()
    }

    fn firsts(batch: &[DataSample]) -> Vec<f64> {
        batch.iter().map(|s| s.inputs[0]).collect()
    }

    #[test]
    fn batch_returns_contiguous_window() {
        let data = numbered(10);
        assert_eq!(firsts(data.batch(0, 5)), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(firsts(data.batch(5, 5)), vec![5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn batch_sentinels_are_empty() {
        let data = numbered(10);
        assert!(data.batch(-1, 5).is_empty());
        assert!(data.batch(10, 1).is_empty());
        assert!(data.batch(8, 5).is_empty());
        assert!(data.batch(isize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn batches_keep_the_tail() {
        let data = numbered(7);
        let sizes: Vec<usize> = data.batches(3).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut data = numbered(50);
        data.shuffle_with(&mut StdRng::seed_from_u64(3));
        let mut seen = firsts(data.samples());
        assert_ne!(seen, firsts(numbered(50).samples()));
        seen.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(seen, firsts(numbered(50).samples()));
    }

    #[test]
    fn from_pairs_zips_inputs_and_targets() {
        let data = Dataset::from_pairs(&[vec![1.0], vec![2.0]], &[vec![0.5], vec![1.5]]).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.samples()[1], DataSample::new(vec![2.0], vec![1.5]));
    }

    #[test]
    fn from_pairs_rejects_unequal_lists() {
        let err = Dataset::from_pairs(&[vec![1.0], vec![2.0], vec![3.0]], &[vec![0.5]]).unwrap_err();
        assert!(matches!(err, NetworkError::PairCount { inputs: 3, targets: 1 }));
    }
}
