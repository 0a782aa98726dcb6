use core::hash::{Hash, Hasher};

/// Fingerprint of an ordered key sequence.
///
/// Two collections have the same epoch iff they contain the same keys in the
/// same order. This lets [`crate::WindowEngine`] distinguish conceptual
/// collection changes (add/remove/reorder) from incidental reference changes
/// that happen on every render pass of the embedding UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epoch(u64);

impl Epoch {
    /// Computes the epoch for `count` keys produced by `key_for`.
    pub fn compute<K: Hash>(count: usize, mut key_for: impl FnMut(usize) -> K) -> Self {
        let mut h = Fnv1a::new();
        h.write_usize(count);
        for i in 0..count {
            key_for(i).hash(&mut h);
            // Separator so adjacent variable-length keys cannot alias.
            h.write_u8(0x1f);
        }
        Self(h.finish())
    }
}

// FNV-1a: deterministic across runs and platforms, unlike RandomState.
struct Fnv1a(u64);

impl Fnv1a {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    fn new() -> Self {
        Self(Self::OFFSET_BASIS)
    }
}

impl Hasher for Fnv1a {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(Self::PRIME);
        }
    }
}
