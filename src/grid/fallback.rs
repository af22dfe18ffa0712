//! Caller-side pitch estimate for maps where no grid was detected.

const ROUND_TO: f32 = 10.0;
const MIN_PITCH: u32 = 50;
const MAX_PITCH: u32 = 200;

/// Estimate a pitch from the number of squares the map should span along its
/// longest edge: rounded to the nearest 10 px and clamped to `[50, 200]`.
///
/// Zero squares fall back to the upper clamp.
pub fn fallback_grid_size(width: u32, height: u32, target_squares: u32) -> u32 {
    if target_squares == 0 {
        return MAX_PITCH;
    }
    let raw = width.max(height) as f32 / target_squares as f32;
    let rounded = ((raw / ROUND_TO).round() * ROUND_TO) as u32;
    rounded.clamp(MIN_PITCH, MAX_PITCH)
}
