use crate::scene::{PassMetrics, Scene};

/// Full-screen redraws per second implied by the accumulated totals.
///
/// A pass that received no time is treated as having taken one millisecond.
pub fn pass_fps(metrics: &PassMetrics, area: u64) -> u32 {
    let millis = metrics.millis.max(1);
    let area = area.max(1);
    let fps = metrics.pixels.saturating_mul(1000) / millis / area;
    fps.min(u32::MAX as u64) as u32
}

/// Importance-weighted average of every scene's two pass results.
///
/// The opa pass counts with half the scene weight (at least 1). Integer
/// division throughout; an empty input scores 0.
pub fn weighted_fps<'a, I>(scenes: I) -> u32
where
    I: IntoIterator<Item = &'a Scene>,
{
    let mut fps_sum: u64 = 0;
    let mut weight_sum: u64 = 0;

    for scene in scenes {
        fps_sum += scene.normal.fps as u64 * scene.weight() as u64;
        weight_sum += scene.weight() as u64;

        let opa_weight = scene.opa_weight() as u64;
        fps_sum += scene.opa.fps as u64 * opa_weight;
        weight_sum += opa_weight;
    }

    if weight_sum == 0 {
        return 0;
    }
    (fps_sum / weight_sum) as u32
}
