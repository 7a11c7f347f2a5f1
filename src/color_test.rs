use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::consts::FILL_SWATCHES;

#[test]
fn random_color_is_hex() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let c = random_hex_color(&mut rng);
        assert_eq!(c.len(), 7);
        assert!(is_hex_color(&c), "{c}");
    }
}

#[test]
fn random_color_is_seed_deterministic() {
    let mut a = StdRng::seed_from_u64(42);
    let mut b = StdRng::seed_from_u64(42);
    assert_eq!(random_hex_color(&mut a), random_hex_color(&mut b));
}

#[test]
fn random_colors_vary() {
    let mut rng = StdRng::seed_from_u64(1);
    let first = random_hex_color(&mut rng);
    let differs = (0..16).any(|_| random_hex_color(&mut rng) != first);
    assert!(differs);
}

#[test]
fn hex_color_accepts_short_and_long_forms() {
    assert!(is_hex_color("#fff"));
    assert!(is_hex_color("#1E90FF"));
}

#[test]
fn hex_color_rejects_other_strings() {
    assert!(!is_hex_color("fff"));
    assert!(!is_hex_color("#ffff"));
    assert!(!is_hex_color("#ggg"));
    assert!(!is_hex_color("rgb(0, 0, 0)"));
    assert!(!is_hex_color(""));
}

#[test]
fn default_swatches_are_hex() {
    assert!(FILL_SWATCHES.iter().all(|s| is_hex_color(s)));
}
