use image::{GrayImage, Luma};
use imageproc::contrast::{ThresholdType, threshold as ip_threshold};
use ndarray::Array2;

use crate::config::ThresholdOptions;
use crate::polygon::{Color, Point};
use crate::{TagTraceError, TagTraceResult};

/// Gray level written for foreground pixels.
pub const FOREGROUND_LUMA: u8 = 0x00;
/// Gray level written for background pixels.
pub const BACKGROUND_LUMA: u8 = 0xff;

/// An immutable-by-convention two-level raster.
///
/// Pixels are stored row-major as `[[y, x]]`. Lookups outside the grid
/// report [`Color::Background`]: the bitmap is surrounded by infinite paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pixels: Array2<Color>,
}

impl Bitmap {
    /// Create a bitmap filled with a single color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            pixels: Array2::from_elem((height as usize, width as usize), fill),
        }
    }

    /// Create a bitmap from row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> TagTraceResult<Self> {
        let pixels = Array2::from_shape_vec((height as usize, width as usize), pixels)?;
        Ok(Self { pixels })
    }

    /// Threshold a grayscale image into a bitmap.
    pub fn from_gray(gray: &GrayImage, options: &ThresholdOptions) -> Self {
        let binary = ip_threshold(gray, options.threshold, ThresholdType::Binary);
        let (w, h) = binary.dimensions();
        let pixels = Array2::from_shape_fn((h as usize, w as usize), |(y, x)| {
            let Luma([v]) = *binary.get_pixel(x as u32, y as u32);
            let color = if v == 0 {
                Color::Foreground
            } else {
                Color::Background
            };
            if options.invert { color.inverted() } else { color }
        });
        Self { pixels }
    }

    /// Render the bitmap as a grayscale image, foreground black on white.
    pub fn to_gray(&self) -> GrayImage {
        let (w, h) = self.dimensions();
        GrayImage::from_fn(w, h, |x, y| {
            let v = match self.pixels[[y as usize, x as usize]] {
                Color::Foreground => FOREGROUND_LUMA,
                Color::Background => BACKGROUND_LUMA,
            };
            Luma([v])
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.nrows() as u32
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Fail with [`TagTraceError::EmptyBitmap`] when the bitmap has no pixels.
    pub fn ensure_not_empty(&self) -> TagTraceResult<()> {
        if self.is_empty() {
            let (width, height) = self.dimensions();
            return Err(TagTraceError::EmptyBitmap { width, height });
        }
        Ok(())
    }

    /// Color at a lattice-addressed pixel; background outside the grid.
    pub fn color_at(&self, p: Point) -> Color {
        match self.index(p) {
            Some(idx) => self.pixels[idx],
            None => Color::Background,
        }
    }

    /// Color of an in-bounds pixel.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels.get([y as usize, x as usize]).copied()
    }

    /// Set an in-bounds pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if let Some(px) = self.pixels.get_mut([y as usize, x as usize]) {
            *px = color;
        }
    }

    /// Paint the half-open rectangle `[x0, x1) x [y0, y1)`, clipped to the grid.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Color) {
        let (w, h) = self.dimensions();
        for y in y0.min(h)..y1.min(h) {
            for x in x0.min(w)..x1.min(w) {
                self.pixels[[y as usize, x as usize]] = color;
            }
        }
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.pixels
            .iter()
            .filter(|c| **c == Color::Foreground)
            .count()
    }

    /// Iterate `(x, y, color)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        self.pixels
            .indexed_iter()
            .map(|((y, x), c)| (x as u32, y as u32, *c))
    }

    fn index(&self, p: Point) -> Option<[usize; 2]> {
        let (w, h) = self.dimensions();
        if p.x < 0 || p.y < 0 || p.x as u32 >= w || p.y as u32 >= h {
            return None;
        }
        Some([p.y as usize, p.x as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image(w: u32, h: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(w, h, Luma([value]))
    }

    mod from_gray {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn dark_pixels_become_foreground() {
                let bitmap = Bitmap::from_gray(&gray_image(2, 2, 10), &ThresholdOptions::default());
                assert_eq!(bitmap.foreground_count(), 4);
            }

            #[test]
            fn light_pixels_become_background() {
                let bitmap =
                    Bitmap::from_gray(&gray_image(2, 2, 200), &ThresholdOptions::default());
                assert_eq!(bitmap.foreground_count(), 0);
            }

            #[test]
            fn exact_threshold_is_foreground() {
                let options = ThresholdOptions::default().with_threshold(128);
                let bitmap = Bitmap::from_gray(&gray_image(1, 1, 128), &options);
                assert_eq!(bitmap.get(0, 0), Some(Color::Foreground));
            }

            #[test]
            fn invert_swaps_levels() {
                let options = ThresholdOptions::default().with_invert(true);
                let bitmap = Bitmap::from_gray(&gray_image(3, 1, 0), &options);
                assert_eq!(bitmap.foreground_count(), 0);
            }

            #[test]
            fn dimensions_preserved() {
                let bitmap = Bitmap::from_gray(&gray_image(5, 3, 0), &ThresholdOptions::default());
                assert_eq!(bitmap.dimensions(), (5, 3));
            }

            #[test]
            fn to_gray_round_trips_levels() {
                let mut input = GrayImage::new(2, 1);
                input.put_pixel(0, 0, Luma([FOREGROUND_LUMA]));
                input.put_pixel(1, 0, Luma([BACKGROUND_LUMA]));
                let bitmap = Bitmap::from_gray(&input, &ThresholdOptions::default());
                assert_eq!(bitmap.to_gray(), input);
            }
        }

        mod prop {
            use super::*;
            use proptest::prelude::*;

            proptest! {
                #[test]
                fn respects_threshold(
                    value in proptest::num::u8::ANY,
                    threshold in proptest::num::u8::ANY
                ) {
                    let options = ThresholdOptions::default().with_threshold(threshold);
                    let bitmap = Bitmap::from_gray(&gray_image(1, 1, value), &options);
                    let expected = if value <= threshold {
                        Color::Foreground
                    } else {
                        Color::Background
                    };
                    prop_assert_eq!(bitmap.get(0, 0), Some(expected));
                }
            }
        }
    }

    mod color_at {
        use super::*;

        #[test]
        fn out_of_bounds_is_background() {
            let bitmap = Bitmap::new(2, 2, Color::Foreground);
            for p in [
                Point::new(-1, 0),
                Point::new(0, -1),
                Point::new(2, 0),
                Point::new(0, 2),
            ] {
                assert_eq!(bitmap.color_at(p), Color::Background, "{p}");
            }
        }

        #[test]
        fn in_bounds_reads_pixel() {
            let mut bitmap = Bitmap::new(2, 2, Color::Background);
            bitmap.set(1, 0, Color::Foreground);
            assert_eq!(bitmap.color_at(Point::new(1, 0)), Color::Foreground);
            assert_eq!(bitmap.color_at(Point::new(0, 1)), Color::Background);
        }
    }

    mod from_pixels {
        use super::*;

        #[test]
        fn length_mismatch_is_shape_error() {
            let err = Bitmap::from_pixels(2, 2, vec![Color::Foreground; 3]).unwrap_err();
            assert!(matches!(err, TagTraceError::Shape(_)));
        }

        #[test]
        fn row_major_layout() {
            let bitmap = Bitmap::from_pixels(
                2,
                1,
                vec![Color::Foreground, Color::Background],
            )
            .unwrap();
            assert_eq!(bitmap.get(0, 0), Some(Color::Foreground));
            assert_eq!(bitmap.get(1, 0), Some(Color::Background));
        }
    }

    #[test]
    fn empty_bitmap_is_rejected() {
        let err = Bitmap::new(0, 4, Color::Background)
            .ensure_not_empty()
            .unwrap_err();
        match err {
            TagTraceError::EmptyBitmap { width, height } => {
                assert_eq!((width, height), (0, 4));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut bitmap = Bitmap::new(3, 3, Color::Background);
        bitmap.fill_rect(1, 1, 10, 10, Color::Foreground);
        assert_eq!(bitmap.foreground_count(), 4);
    }
}
