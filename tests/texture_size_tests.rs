// Host-side tests for texture downscaling.
// The main crate is wasm-only, so the pure module is included directly.

mod texture_size {
    include!("../src/texture_size.rs");
}

use texture_size::fit_within;

#[test]
fn small_images_keep_their_size() {
    assert_eq!(fit_within(512, 256, 2048), (512, 256));
    assert_eq!(fit_within(2048, 2048, 2048), (2048, 2048));
}

#[test]
fn large_images_shrink_to_the_limit() {
    assert_eq!(fit_within(4096, 2048, 2048), (2048, 1024));
    assert_eq!(fit_within(100, 9000, 900), (10, 900));
}

#[test]
fn extreme_aspect_keeps_one_pixel() {
    assert_eq!(fit_within(100_000, 10, 1000), (1000, 1));
}

#[test]
fn empty_images_pass_through() {
    assert_eq!(fit_within(0, 0, 1024), (0, 0));
}
