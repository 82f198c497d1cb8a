use std::fmt;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{palette::Color, piece::Piece, shape::ShapeKind};

/// Draws pieces with a uniformly random shape and color.
///
/// Every draw is independent: any of the 7 shapes and any of the 5 palette
/// colors can come up, including repeats. The returned piece holds its own
/// copy of the catalog matrix at the origin; callers place it with
/// [`Piece::spawned`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "00112233445566778899aabbccddeeff".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
/// for _ in 0..10 {
///     assert_eq!(a.next_piece(), b.next_piece());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    seed: PieceSeed,
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator seeded from the thread-local random source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Returns the seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    pub fn next_piece(&mut self) -> Piece {
        let kind: ShapeKind = self.rng.random();
        let color: Color = self.rng.random();
        Piece::new(kind, color)
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit value; two generators built from the same seed produce the same
/// pieces in the same order. It serializes as a 32-character hex string and
/// can be parsed from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: {reason}")]
pub struct ParseSeedError {
    input: String,
    reason: &'static str,
}

impl std::str::FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason| ParseSeedError {
            input: s.to_owned(),
            reason,
        };
        if s.len() != 32 {
            return Err(error("expected 32 characters"));
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error("expected only hex digits"));
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error("out of range"))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQUENTIAL: [u8; 16] = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32,
        0x10,
    ];

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_all_zeros() {
            let seed = PieceSeed::from_bytes([0; 16]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"00000000000000000000000000000000\"");
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            // Big-endian: the first byte is the first hex pair.
            let seed = PieceSeed::from_bytes(SEQUENTIAL);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_deserialize_uppercase_hex() {
            let json = "\"0123456789ABCDEFFEDCBA9876543210\"";
            let deserialized: PieceSeed = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, PieceSeed::from_bytes(SEQUENTIAL));
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let json = "\"ghijklmnopqrstuvwxyzghijklmnopqr\"";
            let err = serde_json::from_str::<PieceSeed>(json).unwrap_err();
            assert!(err.to_string().contains("invalid hex"));
        }

        #[test]
        fn test_error_wrong_length() {
            for json in [
                "\"\"",
                "\"0123456789abcdef0123456789abcde\"",
                "\"0123456789abcdef0123456789abcdef0\"",
            ] {
                let err = serde_json::from_str::<PieceSeed>(json).unwrap_err();
                assert!(err.to_string().contains("invalid hex"), "{json}");
            }
        }

        #[test]
        fn test_sign_prefix_is_rejected() {
            // `from_str_radix` alone would accept a leading `+`.
            assert!("+123456789abcdef0123456789abcdef".parse::<PieceSeed>().is_err());
        }
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let seed = PieceSeed::from_bytes(SEQUENTIAL);
        let mut generator1 = PieceGenerator::with_seed(seed);
        let mut generator2 = PieceGenerator::with_seed(seed);
        for _ in 0..50 {
            assert_eq!(generator1.next_piece(), generator2.next_piece());
        }
        assert_eq!(generator1.seed(), seed);
    }

    #[test]
    fn test_generator_covers_every_shape_and_color() {
        let mut generator = PieceGenerator::with_seed(PieceSeed::from_bytes([7; 16]));
        let mut kinds = [false; ShapeKind::LEN];
        let mut colors = [false; Color::LEN];
        for _ in 0..500 {
            let piece = generator.next_piece();
            kinds[piece.kind() as usize] = true;
            colors[usize::from(piece.color().index().get()) - 1] = true;
        }
        assert!(kinds.iter().all(|seen| *seen));
        assert!(colors.iter().all(|seen| *seen));
    }

    #[test]
    fn test_generated_piece_copies_catalog() {
        let mut generator = PieceGenerator::new();
        let piece = generator.next_piece();
        assert_eq!(piece.matrix(), &piece.kind().definition().matrix);
        assert_eq!(piece.position(), Default::default());
    }
}
