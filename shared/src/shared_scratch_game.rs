use serde::{Deserialize, Serialize};

use crate::constants::REVEAL_THRESHOLD;

/// Response from the scratch reveal endpoint. The reward is chosen
/// server-side before the user ever touches the card.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScratchRevealResponse {
    pub reward: String,
    pub module: String,
    pub base_price: i64,
    #[serde(default)]
    pub email: Option<String>,
}

/// Gesture state for the scratch card: idle/scratching strokes plus the
/// one-shot reveal latch.
#[derive(Debug, Clone, Default)]
pub struct ScratchCard {
    scratching: bool,
    revealed: bool,
}

impl ScratchCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_stroke(&mut self) {
        self.scratching = true;
    }

    pub fn end_stroke(&mut self) {
        self.scratching = false;
    }

    /// A revealed card ignores further strokes; the mask is already gone.
    pub fn is_scratching(&self) -> bool {
        self.scratching && !self.revealed
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Feeds a fresh revealed-fraction sample. Returns `true` exactly once,
    /// on the first sample strictly above the threshold; the caller runs the
    /// reveal side effects (full clear, persist, confetti) on that edge.
    pub fn register_fraction(&mut self, fraction: f64) -> bool {
        if !self.revealed && fraction > REVEAL_THRESHOLD {
            self.revealed = true;
            return true;
        }
        false
    }

    /// Marks a card restored from session storage as already done.
    pub fn restore_revealed(&mut self) {
        self.revealed = true;
    }
}

/// Fraction of fully transparent pixels in an RGBA pixel buffer, in [0, 1].
/// Only alpha 0 counts as scratched off; partially faded pixels are still
/// covering the reward.
pub fn revealed_fraction(rgba: &[u8]) -> f64 {
    let total = rgba.len() / 4;
    if total == 0 {
        return 0.0;
    }
    let transparent = rgba.chunks_exact(4).filter(|px| px[3] == 0).count();
    transparent as f64 / total as f64
}

/// Maps client (display) coordinates into the canvas's intrinsic pixel
/// space. The canvas may be rendered at a different CSS size than its pixel
/// buffer, so pointer positions have to be rescaled before erasing.
pub fn to_canvas_coords(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
    rect_width: f64,
    rect_height: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> (f64, f64) {
    let x = (client_x - rect_left) * (canvas_width / rect_width);
    let y = (client_y - rect_top) * (canvas_height / rect_height);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(pixels: usize) -> Vec<u8> {
        vec![255u8; pixels * 4]
    }

    fn erase(buffer: &mut [u8], pixel: usize) {
        buffer[pixel * 4 + 3] = 0;
    }

    #[test]
    fn fraction_of_opaque_buffer_is_zero() {
        assert_eq!(revealed_fraction(&opaque(100)), 0.0);
    }

    #[test]
    fn fraction_of_cleared_buffer_is_one() {
        assert_eq!(revealed_fraction(&vec![0u8; 100 * 4]), 1.0);
    }

    #[test]
    fn fraction_of_empty_buffer_is_zero() {
        assert_eq!(revealed_fraction(&[]), 0.0);
    }

    #[test]
    fn partially_faded_pixels_still_count_as_covered() {
        let mut buffer = opaque(4);
        buffer[3] = 1;
        assert_eq!(revealed_fraction(&buffer), 0.0);
    }

    #[test]
    fn fraction_is_monotone_under_erasure() {
        let mut buffer = opaque(100);
        let mut previous = 0.0;
        for pixel in 0..100 {
            erase(&mut buffer, pixel);
            let fraction = revealed_fraction(&buffer);
            assert!(fraction >= previous);
            assert!((0.0..=1.0).contains(&fraction));
            previous = fraction;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn reveal_fires_exactly_once() {
        let mut card = ScratchCard::new();
        assert!(!card.register_fraction(0.3));
        assert!(card.register_fraction(0.51));
        assert!(card.is_revealed());
        assert!(!card.register_fraction(0.9));
    }

    #[test]
    fn reveal_requires_strictly_more_than_threshold() {
        let mut card = ScratchCard::new();
        assert!(!card.register_fraction(REVEAL_THRESHOLD));
        assert!(!card.is_revealed());
    }

    #[test]
    fn strokes_can_pause_and_resume() {
        let mut card = ScratchCard::new();
        card.begin_stroke();
        assert!(card.is_scratching());
        card.end_stroke();
        assert!(!card.is_scratching());
        card.begin_stroke();
        assert!(card.is_scratching());
    }

    #[test]
    fn revealed_card_ignores_strokes() {
        let mut card = ScratchCard::new();
        card.restore_revealed();
        card.begin_stroke();
        assert!(!card.is_scratching());
    }

    #[test]
    fn client_coords_scale_to_canvas_resolution() {
        // Canvas 400x250 displayed at 200x100, offset (10, 10).
        let (x, y) = to_canvas_coords(110.0, 60.0, 10.0, 10.0, 200.0, 100.0, 400.0, 250.0);
        assert_eq!(x, 200.0);
        assert_eq!(y, 125.0);
    }
}
