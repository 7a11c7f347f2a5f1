//! Fill colour helpers.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use rand::Rng;

/// A random opaque colour formatted as `#rrggbb`.
pub fn random_hex_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let rgb: u32 = rng.random_range(0..=0x00FF_FFFF);
    format!("#{rgb:06x}")
}

/// Whether `s` is a `#rgb` or `#rrggbb` hex colour.
#[must_use]
pub fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
