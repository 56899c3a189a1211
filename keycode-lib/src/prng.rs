//! Deterministic pseudorandom bit derivation.

use std::hash::Hasher;

use siphasher::sip::SipHasher24;

use crate::bits::{BitReader, BitWriter, repack_to_buffer_bottom};

/// Output bits contributed by each keyed-hash invocation.
const BITS_PER_ITERATION: usize = 64;

/// SipHash-2-4 digest of `message` under a 16-byte key.
pub(crate) fn sip_digest(key: &[u8; 16], message: &[u8]) -> u64 {
    let mut hasher = SipHasher24::new_with_key(key);
    hasher.write(message);
    hasher.finish()
}

/// Derives exactly `output_bits` pseudorandom bits from `seed`.
///
/// A deterministic function of `(seed, output_bits)` only: a keyed hash in
/// counter mode under a fixed all-zero key, akin to a simplified HKDF
/// expand step. Each invocation hashes one counter byte followed by the
/// byte-reversed seed and contributes 64 little-endian digest bits; the
/// stream is then truncated to `output_bits` and repacked to the caller's
/// left-aligned convention.
///
/// The invocation count is `ceil(output_bits / 64) * 64`, not the obvious
/// `ceil(output_bits / 64)`. Deployed receivers derive the identical
/// stream, so the count cannot be corrected here.
pub fn pseudorandom_bits(seed: &[u8], output_bits: usize) -> Vec<u8> {
    let fixed_key = [0u8; 16];
    let iterations = output_bits.div_ceil(BITS_PER_ITERATION) * BITS_PER_ITERATION;
    let reversed_seed = repack_to_buffer_bottom(seed, seed.len() * 8);
    let mut out = BitWriter::new();
    for counter in 0..iterations {
        let mut message = Vec::with_capacity(1 + reversed_seed.len());
        message.push(counter as u8);
        message.extend_from_slice(&reversed_seed);
        let digest = sip_digest(&fixed_key, &message);
        out.write_bytes(&digest.to_le_bytes(), BITS_PER_ITERATION);
    }
    let raw = out.finish();
    let truncated = BitReader::new(&raw).read(output_bits);
    repack_to_buffer_bottom(&truncated, output_bits)
}
