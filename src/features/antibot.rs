//! Minimal anti-bot measures for the results fetch.
//!
//! Google serves the simple, anchor-based results markup to text-mode
//! browsers, so the client presents itself as an old Lynx build with
//! slightly randomized component versions. The consent cookie skips the
//! EU consent interstitial that would otherwise replace the results page.

use rand::{Rng, RngExt};

/// Fixed consent-bypass cookie sent with every results request.
pub const CONSENT_COOKIE: &str = "CONSENT=PENDING+987; SOCS=CAESHAgBEhIaAB";

/// Assemble a Lynx-style User-Agent from randomized component versions.
///
/// Drawn once per client instance, not per request. The random source is
/// injected so tests can seed it and assert the exact output.
pub fn lynx_user_agent<R: Rng + ?Sized>(rng: &mut R) -> String {
    let lynx = format!(
        "Lynx/{}.{}.{}",
        2 + rng.random_range(0..2),
        8 + rng.random_range(0..2),
        rng.random_range(0..3)
    );
    let libwww = format!(
        "libwww-FM/{}.{}",
        2 + rng.random_range(0..2),
        13 + rng.random_range(0..3)
    );
    let ssl_mm = format!("SSL-MM/1.{}", 3 + rng.random_range(0..3));
    let openssl = format!(
        "OpenSSL/{}.{}.{}",
        1 + rng.random_range(0..3),
        rng.random_range(0..5),
        rng.random_range(0..10)
    );

    format!("{} {} {} {}", lynx, libwww, ssl_mm, openssl)
}
