//! Animated wave frame generation.
//!
//! Each frame is a pure function of the elapsed-time counter: a row of
//! vertical segments whose endpoints ride two independent sine waves, with
//! a dot at each endpoint and the logo overlaid in the center.

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Transform};

/// Horizontal spacing between wave columns.
const WAVE_STEP: f32 = 10.0;

/// Embedded logo image, drawn centered over the wave.
static LOGO_PNG: &[u8] = include_bytes!("../assets/logo.png");

/// Renders wave frames into a drawing surface.
pub struct WaveScene {
    logo: Pixmap,
}

impl WaveScene {
    /// Creates the scene, decoding the embedded logo.
    pub fn new() -> Self {
        let logo = Pixmap::decode_png(LOGO_PNG).expect("Failed to decode logo");
        Self { logo }
    }

    /// Draws one frame for the given elapsed time. Deterministic: the same
    /// elapsed value always produces identical pixels.
    pub fn render(&self, surface: &mut Pixmap, elapsed: f32) {
        surface.fill(Color::from_rgba8(0, 0, 0, 255));

        let width = surface.width() as f32;
        let height = surface.height() as f32;
        let wave_y = height * 0.44;
        let radius = WAVE_STEP * 0.3;

        let mut pb = PathBuilder::new();
        let mut i = 0;
        let mut x = WAVE_STEP * 0.5;
        while x < width {
            let y1 = wave_y + height * 0.10 * (i as f32 * 0.38 + elapsed).sin();
            let y2 = wave_y + height * 0.20 * (i as f32 * 0.20 + elapsed * 2.0).sin();

            // 2px-wide segment joining the two endpoints
            let top = y1.min(y2);
            let bottom = y1.max(y2);
            if let Some(rect) = Rect::from_ltrb(x - 1.0, top, x + 1.0, bottom) {
                pb.push_rect(rect);
            }

            pb.push_circle(x, y1, radius);
            pb.push_circle(x, y2, radius);

            i += 1;
            x += WAVE_STEP;
        }

        if let Some(path) = pb.finish() {
            let mut paint = Paint::default();
            paint.set_color(Color::from_rgba8(128, 128, 128, 255));
            surface.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        let lx = (surface.width() as i32 - self.logo.width() as i32) / 2;
        let ly = (surface.height() as i32 - self.logo.height() as i32) / 2;
        surface.draw_pixmap(
            lx,
            ly,
            self.logo.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

impl Default for WaveScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_deterministic() {
        let scene = WaveScene::new();
        let mut a = Pixmap::new(960, 160).unwrap();
        let mut b = Pixmap::new(960, 160).unwrap();

        scene.render(&mut a, 1.28);
        scene.render(&mut b, 1.28);
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_render_varies_with_elapsed() {
        let scene = WaveScene::new();
        let mut a = Pixmap::new(960, 160).unwrap();
        let mut b = Pixmap::new(960, 160).unwrap();

        scene.render(&mut a, 0.0);
        scene.render(&mut b, 3.0);
        assert_ne!(a.data(), b.data());
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let scene = WaveScene::new();
        let mut first = Pixmap::new(960, 160).unwrap();
        scene.render(&mut first, 0.5);

        // Rendering over stale content must match a fresh render
        let mut dirty = Pixmap::new(960, 160).unwrap();
        scene.render(&mut dirty, 7.7);
        scene.render(&mut dirty, 0.5);
        assert_eq!(first.data(), dirty.data());
    }
}
