/// Fit `(w, h)` inside `max_dim` keeping the aspect ratio.
///
/// Images larger than the device's texture limit are drawn scaled down
/// before upload; each edge stays at least one pixel.
pub fn fit_within(w: u32, h: u32, max_dim: u32) -> (u32, u32) {
    let longest = w.max(h);
    if longest <= max_dim {
        return (w, h);
    }
    let s = max_dim as f64 / longest as f64;
    (
        ((w as f64 * s).round() as u32).max(1),
        ((h as f64 * s).round() as u32).max(1),
    )
}
