// `real-request-token` header generation.
//
// The web app sends a 16-character token derived from the current time in
// milliseconds. Its arithmetic runs on JavaScript numbers: each step is an
// f64 product reduced to an unsigned 32-bit value, so the generator step loses
// precision once the product passes 2^53.

const SALT: &str = "realwebapp";
const TOKEN_LEN: usize = 16;
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";
const U32_RANGE: f64 = 4_294_967_296.0;

/// One generator step as the web app computes it: `(seed * 1103515245 + 12345) >>> 0`
/// on doubles.
fn next_seed(seed: u32) -> u32 {
    let product = f64::from(seed) * 1_103_515_245.0 + 12_345.0;
    product.trunc().rem_euclid(U32_RANGE) as u32
}

/// Build a request token for the given Unix timestamp in milliseconds.
pub fn generate_request_token(timestamp_ms: u64) -> String {
    let hash = format!("{SALT}{timestamp_ms}")
        .bytes()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(u32::from(c)));

    let mut seed = SALT
        .bytes()
        .fold(timestamp_ms as u32, |s, c| s.wrapping_mul(37).wrapping_add(u32::from(c)));

    let mut token = String::with_capacity(TOKEN_LEN);
    for i in 0..TOKEN_LEN {
        seed = next_seed(seed);
        // The sum is taken before reduction, so it must not wrap.
        let idx = (u64::from(seed) + u64::from(hash) + i as u64) % ALPHABET.len() as u64;
        token.push(char::from(ALPHABET[idx as usize]));
    }
    token
}

/// Token for the current wall-clock time.
pub fn current_request_token() -> String {
    let now_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    generate_request_token(now_ms)
}
