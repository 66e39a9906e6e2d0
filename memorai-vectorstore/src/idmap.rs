//! Explicit id mapping between memorai's free-form [`MemoryId`] strings and
//! the narrow alphanumeric-only id syntax many real vector backends impose
//! (UUID-only key stores, backends that reject `-`/`_`, etc.), per the
//! spec's redesign note: replace ad-hoc id munging at call sites with one
//! mapping function carrying its own round-trip invariant.
//!
//! Hex-encoding is the simplest transform that is both reversible and
//! alphanumeric-only for any input string.

use memorai_core::ids::MemoryId;

/// Maps `id` to a lowercase-hex, alphanumeric-only string.
pub fn map(id: &MemoryId) -> String {
    id.as_str().as_bytes().iter().map(|b| format!("{b:02x}")).collect()
}

/// Inverse of [`map`]. Only ever called on strings this module produced.
pub fn unmap(mapped: &str) -> MemoryId {
    let bytes: Vec<u8> = (0..mapped.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&mapped[i..i + 2], 16).expect("idmap: malformed mapped id"))
        .collect();
    MemoryId::from(String::from_utf8(bytes).expect("idmap: malformed mapped id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_map_and_unmap() {
        let id = MemoryId::generate();
        assert_eq!(unmap(&map(&id)), id);
    }

    #[test]
    fn round_trips_arbitrary_ids_with_unfriendly_characters() {
        let id = MemoryId::from("weird id! with/slashes-and_underscores".to_string());
        assert_eq!(unmap(&map(&id)), id);
    }

    #[test]
    fn mapped_ids_are_alphanumeric() {
        let id = MemoryId::from("weird id! with/slashes".to_string());
        assert!(map(&id).chars().all(|c| c.is_ascii_hexdigit()));
    }
}
