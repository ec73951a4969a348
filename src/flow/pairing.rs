//! Pairing codes: generation, parsing and input sanitizing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of digits in a pairing code.
pub const PAIRING_CODE_LEN: usize = 6;

/// Smallest code that can be generated (inclusive).
pub const MIN_PAIRING_CODE: u32 = 100_000;

/// Largest code that can be generated (inclusive).
pub const MAX_PAIRING_CODE: u32 = 999_999;

/// A 6-digit numeric token shown on the connection screen and typed into the bridge app.
///
/// It is only ever compared for string equality; there is no expiry or uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairingCode(String);

/// Rejected pairing code text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pairing code must be exactly {PAIRING_CODE_LEN} digits, got {0:?}")]
pub struct InvalidPairingCode(pub String);

impl PairingCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact string comparison against user input.
    pub fn matches(&self, entered: &str) -> bool {
        self.0 == entered
    }
}

impl FromStr for PairingCode {
    type Err = InvalidPairingCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == PAIRING_CODE_LEN && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidPairingCode(s.to_string()))
        }
    }
}

impl fmt::Display for PairingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip everything but ASCII digits and cap the result at [`PAIRING_CODE_LEN`].
///
/// Idempotent: sanitizing an already clean code returns it unchanged.
pub fn sanitize_code_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PAIRING_CODE_LEN)
        .collect()
}

/// Supplier of fresh pairing codes.
pub trait CodeSource {
    /// Draw a new code. Each call is an independent draw.
    fn next_code(&mut self) -> PairingCode;
}

/// Uniformly random codes in `[MIN_PAIRING_CODE, MAX_PAIRING_CODE]`.
#[derive(Debug)]
pub struct RandomCodeSource {
    rng: StdRng,
}

impl RandomCodeSource {
    /// Seed from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic source for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomCodeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeSource for RandomCodeSource {
    fn next_code(&mut self) -> PairingCode {
        let value = self.rng.random_range(MIN_PAIRING_CODE..=MAX_PAIRING_CODE);
        PairingCode(value.to_string())
    }
}

/// Hands out a fixed list of codes in order, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedCodeSource {
    codes: Vec<PairingCode>,
    next: usize,
}

impl FixedCodeSource {
    pub fn new(codes: Vec<PairingCode>) -> Self {
        assert!(!codes.is_empty(), "FixedCodeSource needs at least one code");
        Self { codes, next: 0 }
    }

    pub fn single(code: PairingCode) -> Self {
        Self::new(vec![code])
    }
}

impl CodeSource for FixedCodeSource {
    fn next_code(&mut self) -> PairingCode {
        let code = self.codes[self.next % self.codes.len()].clone();
        self.next += 1;
        code
    }
}
