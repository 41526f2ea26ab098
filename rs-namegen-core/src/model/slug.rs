use log::warn;
use rand::TryRngCore;
use rand::rngs::OsRng;

/// Slug alphabet: lowercase RFC 4648 base32, `a`-`z` then `2`-`7`.
pub const SLUG_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Random bytes requested from the source per batch.
const BATCH_SIZE: usize = 16;

/// Appends `length` slug characters to `dst`, using the operating system's
/// secure random source.
///
/// Never fails: if the source is unavailable, the missing characters are
/// filled with the first alphabet symbol.
pub fn append_slug(dst: &mut Vec<u8>, length: usize) {
	append_slug_from(dst, length, &mut OsRng);
}

/// Appends `length` slug characters drawn from `rng`.
///
/// Each random byte maps to `SLUG_ALPHABET[byte % 32]`. Since 256 is a
/// multiple of 32 the mapping is uniform.
pub(crate) fn append_slug_from<R: TryRngCore + ?Sized>(dst: &mut Vec<u8>, length: usize, rng: &mut R) {
	if length == 0 {
		return;
	}
	dst.reserve(length);

	let mut buf = [0u8; BATCH_SIZE];
	let mut remaining = length;
	while remaining > 0 {
		if let Err(err) = rng.try_fill_bytes(&mut buf) {
			warn!("secure random source unavailable ({err}), padding slug with '{}'", char::from(SLUG_ALPHABET[0]));
			dst.extend(std::iter::repeat_n(SLUG_ALPHABET[0], remaining));
			return;
		}

		let take = remaining.min(BATCH_SIZE);
		dst.extend(
			buf[..take]
				.iter()
				.map(|byte| SLUG_ALPHABET[usize::from(*byte) % SLUG_ALPHABET.len()]),
		);
		remaining -= take;
	}
}
