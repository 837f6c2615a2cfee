use tracing::warn;

use crate::bitmap::Bitmap;
use crate::polygon::{Color, ContourSet};
use crate::{TagTraceError, TagTraceResult};

/// Fill a contour set back into a bitmap with the even-odd rule.
///
/// A pixel is foreground when a ray from its center crosses the polygon
/// edges an odd number of times, counting every polygon whatever its tag.
/// Only vertical edges can cross a horizontal ray.
pub fn rasterize(contours: &ContourSet) -> Bitmap {
    let (width, height) = contours.dimensions();
    let mut out = Bitmap::new(width, height, Color::Background);
    let mut toggles = vec![false; width as usize + 1];

    for y in 0..height as i32 {
        toggles.iter_mut().for_each(|t| *t = false);
        for polygon in contours {
            for (a, b) in polygon.edges() {
                if a.x != b.x || a.y == b.y {
                    continue;
                }
                if a.y.min(b.y) <= y && y < a.y.max(b.y) {
                    let x = a.x.clamp(0, width as i32) as usize;
                    toggles[x] = !toggles[x];
                }
            }
        }

        let mut filled = false;
        for x in 0..width {
            filled ^= toggles[x as usize];
            if filled {
                out.set(x, y as u32, Color::Foreground);
            }
        }
    }

    out
}

/// Check that `contours` fill back into exactly `bitmap`.
pub fn verify_round_trip(bitmap: &Bitmap, contours: &ContourSet) -> TagTraceResult<()> {
    let rendered = rasterize(contours);
    if rendered.dimensions() != bitmap.dimensions() {
        let x = rendered.width().min(bitmap.width());
        let y = rendered.height().min(bitmap.height());
        warn!(x, y, "contour set size differs from bitmap");
        return Err(TagTraceError::RoundTripMismatch { x, y });
    }

    let mismatch = bitmap
        .enumerate()
        .find(|&(x, y, c)| rendered.get(x, y) != Some(c));
    match mismatch {
        Some((x, y, _)) => {
            warn!(x, y, "contours do not reproduce bitmap");
            Err(TagTraceError::RoundTripMismatch { x, y })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::extract;
    use crate::polygon::{Point, Polygon};

    fn square(color: Color, x: i32, y: i32, size: i32) -> Polygon {
        Polygon::new(
            color,
            vec![
                Point::new(x, y),
                Point::new(x + size, y),
                Point::new(x + size, y + size),
                Point::new(x, y + size),
            ],
        )
    }

    mod rasterize {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn empty_set_is_background() {
                let bitmap = rasterize(&ContourSet::new(3, 2, Vec::new()));
                assert_eq!(bitmap, Bitmap::new(3, 2, Color::Background));
            }

            #[test]
            fn nested_square_punches_hole() {
                let set = ContourSet::new(
                    3,
                    3,
                    vec![
                        square(Color::Foreground, 0, 0, 3),
                        square(Color::Background, 1, 1, 1),
                    ],
                );
                let bitmap = rasterize(&set);
                assert_eq!(bitmap.foreground_count(), 8);
                assert_eq!(bitmap.get(1, 1), Some(Color::Background));
            }

            #[test]
            fn corner_touching_squares_fill_both() {
                let set = ContourSet::new(
                    2,
                    2,
                    vec![
                        square(Color::Foreground, 0, 0, 1),
                        square(Color::Foreground, 1, 1, 1),
                    ],
                );
                let bitmap = rasterize(&set);
                assert_eq!(bitmap.get(0, 0), Some(Color::Foreground));
                assert_eq!(bitmap.get(1, 1), Some(Color::Foreground));
                assert_eq!(bitmap.foreground_count(), 2);
            }
        }

        mod prop {
            use super::*;
            use proptest::prelude::*;

            fn arb_bitmap() -> impl Strategy<Value = Bitmap> {
                (1u32..10, 1u32..10).prop_flat_map(|(w, h)| {
                    proptest::collection::vec(proptest::bool::ANY, (w * h) as usize).prop_map(
                        move |bits| {
                            let pixels = bits
                                .into_iter()
                                .map(|b| if b { Color::Foreground } else { Color::Background })
                                .collect();
                            Bitmap::from_pixels(w, h, pixels).unwrap()
                        },
                    )
                })
            }

            /// Larger bitmaps whose ink density ranges from sparse specks to mostly solid.
            fn arb_dense_bitmap() -> impl Strategy<Value = Bitmap> {
                (1u32..64, 1u32..64, 0.05f64..0.95).prop_flat_map(|(w, h, density)| {
                    proptest::collection::vec(proptest::bool::weighted(density), (w * h) as usize)
                        .prop_map(move |bits| {
                            let pixels = bits
                                .into_iter()
                                .map(|b| if b { Color::Foreground } else { Color::Background })
                                .collect();
                            Bitmap::from_pixels(w, h, pixels).unwrap()
                        })
                })
            }

            proptest! {
                #[test]
                fn extraction_round_trips(bitmap in arb_bitmap()) {
                    let set = extract(&bitmap).unwrap();
                    prop_assert_eq!(rasterize(&set), bitmap);
                }
            }

            proptest! {
                #![proptest_config(ProptestConfig::with_cases(64))]

                #[test]
                fn large_bitmaps_round_trip_within_default_limit(bitmap in arb_dense_bitmap()) {
                    let set = extract(&bitmap).unwrap();
                    prop_assert!(set.polygons().iter().all(|p| p.is_axis_aligned()));
                    prop_assert_eq!(rasterize(&set), bitmap);
                }
            }
        }
    }

    mod verify_round_trip {
        use super::*;

        #[test]
        fn matching_contours_pass() {
            let mut bitmap = Bitmap::new(4, 4, Color::Background);
            bitmap.fill_rect(1, 1, 3, 3, Color::Foreground);
            let set = extract(&bitmap).unwrap();
            assert!(verify_round_trip(&bitmap, &set).is_ok());
        }

        #[test]
        fn reports_first_mismatch() {
            let bitmap = Bitmap::new(3, 3, Color::Background);
            let set = ContourSet::new(3, 3, vec![square(Color::Foreground, 1, 2, 1)]);
            match verify_round_trip(&bitmap, &set).unwrap_err() {
                TagTraceError::RoundTripMismatch { x, y } => assert_eq!((x, y), (1, 2)),
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}
