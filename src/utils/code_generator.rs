//! Short code generation and validation utilities.
//!
//! Codes are drawn from a fixed 63-symbol, URL-path-safe alphabet using the
//! operating system CSPRNG. Bytes are consumed one at a time and rejection
//! sampling removes the modulo bias of mapping `0..=255` onto 63 symbols.

/// The code alphabet: `a-z`, `A-Z`, `0-9` and `_`.
pub const ALPHABET: &[u8; 63] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

/// Length of every generated (and accepted) short code.
pub const CODE_LENGTH: usize = 10;

/// Largest multiple of the alphabet size that fits in a byte (`4 * 63`).
///
/// Bytes at or above this value are discarded and redrawn.
const REJECTION_THRESHOLD: u8 = 252;

/// Errors that can occur while generating a code.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Random source failure: {0}")]
    RandomSource(String),
}

/// A source of candidate short codes.
///
/// The shortening service takes a generator as a type parameter so tests can
/// inject deterministic sequences. Any `Fn(usize) -> Result<String, GenerateError>`
/// closure is a generator.
pub trait CodeGenerator: Send + Sync {
    /// Produces a candidate code of `length` characters.
    fn generate(&self, length: usize) -> Result<String, GenerateError>;
}

impl<F> CodeGenerator for F
where
    F: Fn(usize) -> Result<String, GenerateError> + Send + Sync,
{
    fn generate(&self, length: usize) -> Result<String, GenerateError> {
        self(length)
    }
}

/// Production generator backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsCodeGenerator;

impl CodeGenerator for OsCodeGenerator {
    fn generate(&self, length: usize) -> Result<String, GenerateError> {
        generate_code(length)
    }
}

/// Generates a cryptographically secure random short code.
///
/// # Errors
///
/// Returns [`GenerateError::RandomSource`] if the system random number
/// generator fails. The failure is not retried here.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(CODE_LENGTH)?;
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code(length: usize) -> Result<String, GenerateError> {
    generate_from(length, || {
        let mut byte = [0u8; 1];
        getrandom::fill(&mut byte).map_err(|e| GenerateError::RandomSource(e.to_string()))?;
        Ok(byte[0])
    })
}

/// Builds a code from an arbitrary byte source, applying rejection sampling.
fn generate_from<S>(length: usize, mut next_byte: S) -> Result<String, GenerateError>
where
    S: FnMut() -> Result<u8, GenerateError>,
{
    let mut code = String::with_capacity(length);

    while code.len() < length {
        let byte = next_byte()?;
        if byte >= REJECTION_THRESHOLD {
            continue;
        }
        code.push(char::from(ALPHABET[usize::from(byte) % ALPHABET.len()]));
    }

    Ok(code)
}

/// Returns true if `code` has exactly [`CODE_LENGTH`] characters, all from [`ALPHABET`].
///
/// Used both on generator output and on codes supplied by callers, so that
/// structurally invalid codes never reach storage.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    #[test]
    fn test_alphabet_has_63_unique_symbols() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 63);
        assert_eq!(usize::from(REJECTION_THRESHOLD), ALPHABET.len() * 4);
        assert!(usize::from(REJECTION_THRESHOLD) + ALPHABET.len() > 256);
    }

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code(CODE_LENGTH).unwrap();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_uses_alphabet() {
        for _ in 0..1000 {
            let code = generate_code(CODE_LENGTH).unwrap();
            assert!(is_valid_code(&code), "invalid code generated: {code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..20_000 {
            codes.insert(generate_code(CODE_LENGTH).unwrap());
        }

        assert_eq!(codes.len(), 20_000);
    }

    #[test]
    fn test_os_generator_implements_trait() {
        let code = OsCodeGenerator.generate(CODE_LENGTH).unwrap();
        assert!(is_valid_code(&code));
    }

    #[test]
    fn test_rejection_sampling_discards_high_bytes() {
        let mut bytes = VecDeque::from(vec![255, 252, 0, 253, 63, 64, 254, 251]);
        let code = generate_from(4, || Ok(bytes.pop_front().unwrap())).unwrap();

        // 0 -> 'a', 63 % 63 = 0 -> 'a', 64 % 63 = 1 -> 'b', 251 % 63 = 62 -> '_'
        assert_eq!(code, "aab_");
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_random_source_failure_is_propagated() {
        let result = generate_from(CODE_LENGTH, || {
            Err(GenerateError::RandomSource("entropy unavailable".to_string()))
        });

        assert!(matches!(result, Err(GenerateError::RandomSource(_))));
    }

    #[test]
    fn test_closure_is_a_generator() {
        let generator = |n: usize| Ok::<_, GenerateError>("x".repeat(n));
        assert_eq!(generator.generate(3).unwrap(), "xxx");
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("Abcdef_123"));
        assert!(is_valid_code("__________"));
        assert!(!is_valid_code("short"));
        assert!(!is_valid_code("this_is_11c"));
        assert!(!is_valid_code("ABC-123_de"));
        assert!(!is_valid_code("абвгдежзий"));
        assert!(!is_valid_code(""));
    }
}
