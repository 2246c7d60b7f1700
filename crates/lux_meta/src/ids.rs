//! Stable identity hashing shared by every node in a Meta Unit.
//!
//! Mirrors `lux::cxx::algorithm::fnv1a` from the original C++ toolchain:
//! a 64-bit FNV-1a over the raw bytes of a textual identifier. The constants
//! must never change — generated artifacts and serialized Meta Units embed
//! hashes produced by this function.

const FNV_OFFSET_BASIS: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

/// 64-bit FNV-1a hash of `text`, stable across processes and platforms.
pub fn fnv1a(text: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in text.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_offset_basis() {
        assert_eq!(fnv1a(""), FNV_OFFSET_BASIS);
    }

    #[test]
    fn deterministic_across_calls() {
        assert_eq!(fnv1a("LUX::META;reflect"), fnv1a("LUX::META;reflect"));
    }

    #[test]
    fn distinguishes_inputs() {
        assert_ne!(fnv1a("S"), fnv1a("s"));
    }
}
