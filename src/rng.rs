/// Number of entries in the lookup table; the cursor wraps at this length.
pub const RND_NUM: usize = 64;

#[rustfmt::skip]
const RND_MAP: [u32; RND_NUM] = [
    0xbd13204f, 0x67d8167f, 0x20211c99, 0xb0a7cc05,
    0x06d5c703, 0xeafb01a7, 0xd0473b5c, 0xc999aaa2,
    0x86f9d5d9, 0x294bdb29, 0x12a3c207, 0x78914d14,
    0x10a30006, 0x6134c7db, 0x194443af, 0x142d1099,
    0x376292d5, 0x20f433c5, 0x074d2a59, 0x4e74c293,
    0x072a0810, 0xdd0f136d, 0x5cca6dbc, 0x623bfdd8,
    0xb645eb2f, 0xbe50894a, 0xc9b56717, 0xe0f912c8,
    0x4f6b5e24, 0xfe44b128, 0xe12d57a8, 0x9b15c9cc,
    0xab2ae1d3, 0xb4dc5074, 0x67d457c8, 0x8e46b00c,
    0xa29a1871, 0xcee40332, 0x80f93aa1, 0x85286096,
    0x09bd6b49, 0x95072088, 0x2093924b, 0x6a27328f,
    0xa796079b, 0xc3b488bc, 0xe29bcce0, 0x07048a4c,
    0x7d81bd99, 0x27aacb30, 0x44fc7a0e, 0xa2382241,
    0x8357a17d, 0x97e9c9cc, 0xad10ff52, 0x9923fc5c,
    0x8f2c840a, 0x20356ba2, 0x7997a677, 0x9a7f1800,
    0x35c7562b, 0xd901fe51, 0x8f4e053d, 0xa5b94923,
];

/// Reproducible number source for object placement, size and color.
///
/// Values come from a fixed table, so two runs that reset the sequencer at
/// the same points see the same layouts. Not suitable for anything that
/// needs real randomness.
#[derive(Debug, Clone, Default)]
pub struct RandomSequencer {
    cursor: usize,
}

impl RandomSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewind to the first table entry.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Next value in `[min, max)`.
    ///
    /// # Panics
    ///
    /// Panics if `max <= min`.
    pub fn next(&mut self, min: u32, max: u32) -> u32 {
        assert!(max > min, "empty range {min}..{max}");

        let value = RND_MAP[self.cursor] % (max - min) + min;
        self.cursor = (self.cursor + 1) % RND_NUM;
        value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_stay_in_range() {
        let mut rng = RandomSequencer::new();
        for (min, max) in [(0, 1), (5, 6), (10, 400), (0, 0xFFFFF0), (128, 320)] {
            for _ in 0..RND_NUM * 2 {
                let v = rng.next(min, max);
                assert!(v >= min && v < max, "{v} not in {min}..{max}");
            }
        }
    }

    #[test]
    fn test_sequence_is_deterministic_after_reset() {
        let mut rng = RandomSequencer::new();
        let first: Vec<u32> = (0..RND_NUM).map(|_| rng.next(0, 1000)).collect();

        // Advance to an arbitrary position before resetting
        rng.next(3, 9);
        rng.reset();
        let second: Vec<u32> = (0..RND_NUM).map(|_| rng.next(0, 1000)).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_range_returns_min() {
        let mut rng = RandomSequencer::new();
        rng.reset();
        assert_eq!(rng.next(0, 1), 0);
        assert_eq!(rng.next(7, 8), 7);
    }

    #[test]
    fn test_known_table_values() {
        let mut rng = RandomSequencer::new();
        assert_eq!(rng.next(0, 0xFFFFF0), 0xbd13204f % 0xFFFFF0);
        assert_eq!(rng.next(0, 100), 0x67d8167f % 100);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut rng = RandomSequencer::new();
        for _ in 0..RND_NUM {
            rng.next(0, 10);
        }
        assert_eq!(rng.cursor(), 0);
        assert_eq!(rng.next(0, 0xFFFFF0), 0xbd13204f % 0xFFFFF0);
        assert_eq!(rng.cursor(), 1);
    }

    #[test]
    #[should_panic(expected = "empty range")]
    fn test_empty_range_panics() {
        RandomSequencer::new().next(4, 4);
    }
}
