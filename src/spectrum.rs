//! Per-frame frequency magnitudes and their energy reduction.

use std::ops::Deref;

/// Byte magnitudes (0-255), one per frequency bin
///
/// The length is fixed for the lifetime of an analyser configuration; the
/// contents are overwritten in place every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencySample {
    bins: Vec<u8>,
}

impl FrequencySample {
    /// Zeroed sample with `bin_count` bins
    pub fn new(bin_count: usize) -> Self {
        Self {
            bins: vec![0; bin_count],
        }
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Mutable view for the analyser to write into
    pub fn bins_mut(&mut self) -> &mut [u8] {
        &mut self.bins
    }

}

impl Deref for FrequencySample {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bins
    }
}

impl From<Vec<u8>> for FrequencySample {
    fn from(bins: Vec<u8>) -> Self {
        Self { bins }
    }
}

/// Arithmetic mean of all bins
///
/// An empty sample has no energy and averages to `0.0`.
pub fn reduce_energy(sample: &[u8]) -> f32 {
    if sample.is_empty() {
        return 0.0;
    }
    let sum: u64 = sample.iter().map(|&v| v as u64).sum();
    (sum as f64 / sample.len() as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_energy_mean() {
        assert_eq!(reduce_energy(&[0, 10, 20, 30]), 15.0);
        assert_eq!(reduce_energy(&[255; 256]), 255.0);
    }

    #[test]
    fn test_reduce_energy_empty_is_zero() {
        assert_eq!(reduce_energy(&[]), 0.0);
    }

    #[test]
    fn test_reduce_energy_is_idempotent() {
        let sample = FrequencySample::from(vec![3, 7, 200, 41, 0, 99]);
        let first = reduce_energy(&sample);
        let second = reduce_energy(&sample);
        assert_eq!(first, second);
    }

    #[test]
    fn test_new_sample_is_zeroed() {
        let sample = FrequencySample::new(256);
        assert_eq!(sample.bin_count(), 256);
        assert!(sample.iter().all(|&v| v == 0));
    }
}
