//! Random byte capability.

use rand::RngCore;
use rand::rngs::OsRng;

pub trait RandomSource: Send + Sync {
    fn fill(&self, buf: &mut [u8]);

    fn bytes(&self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        self.fill(&mut buf);
        buf
    }

    /// Uniform-ish integer in `low..=high`.
    fn range(&self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = u64::from(high - low) + 1;
        let mut buf = [0u8; 8];
        self.fill(&mut buf);
        low + (u64::from_le_bytes(buf) % span) as u32
    }
}

/// Cryptographically secure randomness from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) {
        OsRng.fill_bytes(buf);
    }
}
