use std::str::FromStr;

use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Error returned when seed text cannot be turned into a [`Seed`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedError {
    #[display("seed {text:?} is out of range (expected an integer between 0 and {})", u64::MAX)]
    OutOfRange { text: String },
}

/// Seed of the pseudo-random stream driving one evolution run.
///
/// Two runs started with the same seed and configuration are identical.
///
/// # Parsing
///
/// Seeds are usually typed by a user, so any text is accepted:
///
/// - a non-negative integer is used as-is
/// - a negative or too large integer is rejected
/// - any other text is hashed (64-bit FNV-1a of the trimmed text)
///
/// ```
/// use oxiqueens_engine::Seed;
///
/// assert_eq!("625".parse::<Seed>().unwrap(), Seed::new(625));
/// assert!("-1".parse::<Seed>().is_err());
///
/// let a: Seed = "eight queens".parse().unwrap();
/// let b: Seed = " eight queens ".parse().unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Seed(u64);

impl Seed {
    /// Creates a seed from its integer value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Creates a seed from a Unix timestamp in milliseconds.
    ///
    /// This is the default seed rule when the user does not provide one. The engine
    /// itself never reads the clock; callers pass the timestamp in.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis.unsigned_abs())
    }

    /// Creates a seed by hashing arbitrary text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let hash = text
            .trim()
            .bytes()
            .fold(FNV_OFFSET_BASIS, |hash, byte| {
                (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
            });
        Self(hash)
    }

    /// Returns the integer value of this seed.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Creates the pseudo-random generator seeded by this value.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::seed_from_u64(self.0)
    }
}

impl FromStr for Seed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self::from_text(text));
        }
        text.parse::<u64>()
            .map(Self)
            .map_err(|_| SeedError::OutOfRange {
                text: text.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;

    use super::*;

    #[test]
    fn test_parse_integers() {
        assert_eq!("0".parse::<Seed>().unwrap(), Seed::new(0));
        assert_eq!(" 206\n".parse::<Seed>().unwrap(), Seed::new(206));
        assert_eq!("+42".parse::<Seed>().unwrap(), Seed::new(42));
        assert_eq!(
            "18446744073709551615".parse::<Seed>().unwrap(),
            Seed::new(u64::MAX)
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range_integers() {
        assert_eq!(
            "-5".parse::<Seed>(),
            Err(SeedError::OutOfRange {
                text: "-5".to_owned()
            })
        );
        assert!("18446744073709551616".parse::<Seed>().is_err());
    }

    #[test]
    fn test_parse_hashes_other_text() {
        assert_eq!("a".parse::<Seed>().unwrap(), Seed::new(0xaf63_dc4c_8601_ec8c));
        assert_eq!("".parse::<Seed>().unwrap(), Seed::new(FNV_OFFSET_BASIS));
        assert_eq!("-".parse::<Seed>().unwrap(), Seed::from_text("-"));
        assert_ne!(
            "12abc".parse::<Seed>().unwrap(),
            "12abd".parse::<Seed>().unwrap()
        );
    }

    #[test]
    fn test_from_unix_millis() {
        assert_eq!(
            Seed::from_unix_millis(1_700_000_000_000).value(),
            1_700_000_000_000
        );
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Seed::new(99).rng();
        let mut b = Seed::new(99).rng();
        let xs = (0..16).map(|_| a.random::<u32>()).collect::<Vec<_>>();
        let ys = (0..16).map(|_| b.random::<u32>()).collect::<Vec<_>>();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Seed::new(625)).unwrap();
        assert_eq!(json, "625");
        assert_eq!(serde_json::from_str::<Seed>(&json).unwrap(), Seed::new(625));
    }
}
