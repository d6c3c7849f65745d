//! Fixed-capacity window of the most recent mono samples.

use std::collections::VecDeque;

/// Sliding window over incoming audio, oldest samples evicted first
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one mono sample
    pub fn push(&mut self, sample: f32) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Append interleaved frames, averaging channels down to mono
    pub fn push_interleaved(&mut self, data: &[f32], channels: usize) {
        let channels = channels.max(1);
        for frame in data.chunks(channels) {
            let mono = frame.iter().sum::<f32>() / frame.len() as f32;
            self.push(mono);
        }
    }

    /// Copy the newest `out.len()` samples into `out`, oldest first
    ///
    /// When fewer are buffered the front of `out` is zero-filled (silence).
    pub fn copy_latest(&self, out: &mut [f32]) {
        let available = self.samples.len().min(out.len());
        let pad = out.len() - available;
        out[..pad].fill(0.0);
        let skip = self.samples.len() - available;
        for (dst, src) in out[pad..].iter_mut().zip(self.samples.iter().skip(skip)) {
            *dst = *src;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_evicts_oldest() {
        let mut window = SampleWindow::new(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            window.push(v);
        }
        assert_eq!(window.samples.len(), 3);

        let mut out = [0.0; 3];
        window.copy_latest(&mut out);
        assert_eq!(out, [3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_copy_latest_zero_pads_front() {
        let mut window = SampleWindow::new(8);
        window.push(0.5);
        window.push(-0.5);

        let mut out = [9.0; 4];
        window.copy_latest(&mut out);
        assert_eq!(out, [0.0, 0.0, 0.5, -0.5]);
    }

    #[test]
    fn test_copy_latest_shorter_than_buffer() {
        let mut window = SampleWindow::new(8);
        for v in 0..8 {
            window.push(v as f32);
        }
        let mut out = [0.0; 2];
        window.copy_latest(&mut out);
        assert_eq!(out, [6.0, 7.0]);
    }

    #[test]
    fn test_push_interleaved_downmixes() {
        let mut window = SampleWindow::new(4);
        window.push_interleaved(&[1.0, 0.0, 0.5, 0.5, -1.0, 1.0], 2);

        let mut out = [0.0; 3];
        window.copy_latest(&mut out);
        assert_eq!(out, [0.5, 0.5, 0.0]);
    }
}
