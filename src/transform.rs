//! Coordinate spaces and the pan/zoom transform.
//!
//! Three spaces are involved:
//! - percentage space: [`Coordinate`], `[0, 100]` per axis, persisted
//! - image space: pixels of the view image
//! - screen space: pixels of the canvas, `screen = image * scale + translate`
//!
//! Everything here is a pure function.

use hotmap_ui::constants::{ZOOM_MAX, ZOOM_MIN};
use hotmap_ui::{Point, Size};

use crate::model::{Coordinate, ImageSize};

/// Convert an image-pixel point to percentage space.
///
/// Returns None while the image has no dimensions (not loaded yet).
pub fn to_percentage(image_px: Point, image: ImageSize) -> Option<Coordinate> {
    if image.is_empty() {
        return None;
    }
    Some(Coordinate::new(
        image_px.x * Coordinate::MAX / image.width as f32,
        image_px.y * Coordinate::MAX / image.height as f32,
    ))
}

/// Convert a percentage-space coordinate to image pixels.
pub fn to_image_pixels(coord: Coordinate, image: ImageSize) -> Point {
    Point::new(
        coord.x * image.width as f32 / Coordinate::MAX,
        coord.y * image.height as f32 / Coordinate::MAX,
    )
}

/// Affine map from image space to screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Uniform scale, always > 0
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Transform {
    /// Create a new transform with the given scale and translation.
    pub fn new(scale: f32, translate_x: f32, translate_y: f32) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// Create an identity transform (scale=1, no translation).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Scale so the whole image fits the container, letterboxed, never cropped.
    ///
    /// Translation is reset to the origin. Returns None when either size is empty.
    pub fn fit_to_container(container: Size, image: ImageSize) -> Option<Transform> {
        if image.is_empty() || container.is_empty() {
            return None;
        }
        let scale = (container.width / image.width as f32)
            .min(container.height / image.height as f32);
        Some(Transform::new(scale, 0.0, 0.0))
    }

    /// Map a screen point into image space.
    pub fn screen_to_image(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translate_x) / self.scale,
            (screen.y - self.translate_y) / self.scale,
        )
    }

    /// Map an image point into screen space.
    pub fn image_to_screen(&self, image: Point) -> Point {
        Point::new(
            image.x * self.scale + self.translate_x,
            image.y * self.scale + self.translate_y,
        )
    }

    /// Screen point straight to percentage space. None until the image loads.
    pub fn screen_to_percentage(&self, screen: Point, image: ImageSize) -> Option<Coordinate> {
        to_percentage(self.screen_to_image(screen), image)
    }

    /// Percentage-space coordinate straight to screen space.
    pub fn percentage_to_screen(&self, coord: Coordinate, image: ImageSize) -> Point {
        self.image_to_screen(to_image_pixels(coord, image))
    }

    /// Zoom by `factor` keeping the image point under `focal` fixed on screen.
    ///
    /// The scale is clamped to `[ZOOM_MIN, ZOOM_MAX]`.
    pub fn zoom_at(&self, focal: Point, factor: f32) -> Transform {
        self.zoom_at_clamped(focal, factor, ZOOM_MIN, ZOOM_MAX)
    }

    /// [`Transform::zoom_at`] with explicit scale bounds.
    ///
    /// The algorithm:
    /// 1. Find the image-space point under the focal point
    /// 2. Apply the new scale
    /// 3. Recompute the translation so that image point maps back to `focal`
    ///
    /// A factor that is not finite and positive leaves the transform as is.
    pub fn zoom_at_clamped(&self, focal: Point, factor: f32, min: f32, max: f32) -> Transform {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("Ignoring zoom factor {}", factor);
            return *self;
        }
        let new_scale = (self.scale * factor).clamp(min, max);
        let image = self.screen_to_image(focal);

        Transform {
            scale: new_scale,
            translate_x: focal.x - image.x * new_scale,
            translate_y: focal.y - image.y * new_scale,
        }
    }

    /// Apply a raw screen-space pan delta to the transform.
    pub fn pan_by(&self, dx: f32, dy: f32) -> Transform {
        Transform {
            scale: self.scale,
            translate_x: self.translate_x + dx,
            translate_y: self.translate_y + dy,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn approx_point(a: Point, b: Point) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.image_to_screen(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_percentage_round_trip() {
        let sizes = [
            ImageSize::new(1, 1),
            ImageSize::new(1920, 1080),
            ImageSize::new(333, 7777),
        ];
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.5),
            Point::new(960.25, 540.75),
            Point::new(332.9, 12.0),
        ];
        for size in sizes {
            for p in points {
                let coord = to_percentage(p, size).unwrap();
                let back = to_image_pixels(coord, size);
                assert!(approx_point(back, p), "{:?} via {:?} -> {:?}", p, size, back);
            }
        }
    }

    #[test]
    fn test_percentage_needs_loaded_image() {
        assert_eq!(to_percentage(Point::new(1.0, 1.0), ImageSize::new(0, 100)), None);
        assert_eq!(
            to_percentage(Point::new(50.0, 25.0), ImageSize::new(100, 50)),
            Some(Coordinate::new(50.0, 50.0))
        );
    }

    #[test]
    fn test_screen_image_inverse() {
        let t = Transform::new(2.5, -40.0, 12.0);
        let p = Point::new(123.0, 45.0);
        assert!(approx_point(t.screen_to_image(t.image_to_screen(p)), p));
    }

    #[test]
    fn test_fit_to_container_letterboxes() {
        // Wide container: height limits
        let t = Transform::fit_to_container(Size::new(1000.0, 500.0), ImageSize::new(400, 400))
            .unwrap();
        assert!(approx_eq(t.scale, 1.25));
        assert_eq!((t.translate_x, t.translate_y), (0.0, 0.0));

        // The whole image is visible
        let corner = t.image_to_screen(Point::new(400.0, 400.0));
        assert!(corner.x <= 1000.0 && corner.y <= 500.0);

        assert!(Transform::fit_to_container(Size::new(100.0, 100.0), ImageSize::new(0, 10)).is_none());
        assert!(Transform::fit_to_container(Size::new(0.0, 100.0), ImageSize::new(10, 10)).is_none());
    }

    #[test]
    fn test_zoom_keeps_focal_point_fixed() {
        let transforms = [
            Transform::identity(),
            Transform::new(1.5, 50.0, 30.0),
            Transform::new(0.4, -200.0, 90.0),
        ];
        let focals = [Point::new(0.0, 0.0), Point::new(150.0, 120.0), Point::new(-30.0, 400.0)];
        for t in transforms {
            for focal in focals {
                for factor in [0.5, 1.2, 2.0] {
                    let image_under_cursor = t.screen_to_image(focal);
                    let zoomed = t.zoom_at(focal, factor);
                    assert!(
                        approx_point(zoomed.image_to_screen(image_under_cursor), focal),
                        "{:?} at {:?} x{}",
                        t,
                        focal,
                        factor
                    );
                }
            }
        }
    }

    #[test]
    fn test_zoom_clamps_scale() {
        let t = Transform::new(3.0, 0.0, 0.0);
        assert_eq!(t.zoom_at(Point::ZERO, 10.0).scale, ZOOM_MAX);
        let t = Transform::new(0.3, 0.0, 0.0);
        assert_eq!(t.zoom_at(Point::ZERO, 0.1).scale, ZOOM_MIN);
    }

    #[test]
    fn test_zoom_ignores_bad_factor() {
        let t = Transform::new(1.5, 10.0, -4.0);
        for factor in [0.0, -1.2, f32::NAN, f32::INFINITY] {
            assert_eq!(t.zoom_at(Point::new(50.0, 50.0), factor), t);
        }
    }

    #[test]
    fn test_zoom_at_origin_keeps_translation() {
        let t = Transform::identity().zoom_at(Point::ZERO, 2.0);
        assert_eq!(t.scale, 2.0);
        assert!(approx_eq(t.translate_x, 0.0));
        assert!(approx_eq(t.translate_y, 0.0));
    }

    #[test]
    fn test_pan_preserves_scale() {
        let t = Transform::new(2.5, 10.0, 20.0).pan_by(5.0, -10.0);
        assert_eq!(t.scale, 2.5);
        assert_eq!((t.translate_x, t.translate_y), (15.0, 10.0));
    }

    #[test]
    fn test_screen_to_percentage() {
        let t = Transform::new(2.0, 10.0, 10.0);
        let size = ImageSize::new(200, 100);
        let coord = t.screen_to_percentage(Point::new(210.0, 110.0), size).unwrap();
        assert!(approx_eq(coord.x, 50.0) && approx_eq(coord.y, 50.0));
        assert!(approx_point(t.percentage_to_screen(coord, size), Point::new(210.0, 110.0)));
    }
}
