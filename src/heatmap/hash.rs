//! Stable 32-bit FNV-1a hash and the cosmetic cell jitter derived from it.
//!
//! The hash runs over UTF-16 code units so a seed hashes to the same value
//! here as it does in a browser computing `charCodeAt` per character.

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

pub const DEFAULT_JITTER_AMPLITUDE: f32 = 2.2;

pub fn hash_seed(seed: &str) -> u32 {
    seed.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Offset applied to where a cell is painted. Never used for hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Jitter {
    pub x: f32,
    pub y: f32,
}

/// Low byte of the hash drives x, the next byte drives y; each maps to
/// [-1, 1] and is scaled by `amplitude`.
pub fn jitter_for(seed: &str, amplitude: f32) -> Jitter {
    let hash = hash_seed(seed);
    let to_unit = |byte: u32| (byte as f32 / 255.0) * 2.0 - 1.0;

    Jitter {
        x: to_unit(hash & 0xff) * amplitude,
        y: to_unit((hash >> 8) & 0xff) * amplitude,
    }
}
