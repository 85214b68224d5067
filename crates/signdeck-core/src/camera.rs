//! Camera module for the artboard viewport.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform of the artboard.
///
/// Page coordinates are fixed. The camera maps them onto the screen with a
/// pan offset and a zoom factor, so element geometry never depends on the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Screen pixels per page unit.
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.05,
            max_zoom: 4.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page to screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen to page transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn screen_to_page(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn page_to_screen(&self, page_point: Point) -> Point {
        self.transform() * page_point
    }

    /// Convert a screen-pixel distance into page units at the current zoom.
    pub fn page_threshold(&self, screen_px: f64) -> f64 {
        screen_px / self.zoom
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Multiply the zoom by `factor`, keeping the page point under `anchor` in place.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        let zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if zoom == self.zoom {
            return;
        }
        let pinned = self.screen_to_page(anchor);
        self.zoom = zoom;
        self.offset = anchor.to_vec2() - pinned.to_vec2() * zoom;
    }

    /// Fit the whole page into the viewport, centered.
    pub fn fit_page(&mut self, page: Rect, viewport: Size, padding: f64) {
        if page.is_zero_area() {
            return;
        }

        let available = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );
        let scale_x = available.width / page.width();
        let scale_y = available.height / page.height();
        self.zoom = scale_x.min(scale_y).clamp(self.min_zoom, self.max_zoom);

        let page_center = page.center();
        let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.offset = Vec2::new(
            viewport_center.x - page_center.x * self.zoom,
            viewport_center.y - page_center.y * self.zoom,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_page_with_zoom() {
        let mut camera = Camera::new();
        camera.zoom = 0.25;
        camera.offset = Vec2::new(40.0, 20.0);
        let page = camera.screen_to_page(Point::new(140.0, 70.0));
        assert!((page.x - 400.0).abs() < 1e-9);
        assert!((page.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_page_to_screen_inverts() {
        let camera = Camera {
            offset: Vec2::new(30.0, -20.0),
            zoom: 0.3,
            ..Camera::default()
        };
        let screen = Point::new(123.0, 456.0);
        let back = camera.page_to_screen(camera.screen_to_page(screen));
        assert!((back - screen).hypot() < 1e-10);
    }

    #[test]
    fn test_page_threshold_scales_with_zoom() {
        let mut camera = Camera::new();
        camera.zoom = 0.25;
        assert!((camera.page_threshold(10.0) - 40.0).abs() < f64::EPSILON);
        camera.zoom = 2.0;
        assert!((camera.page_threshold(10.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_at_keeps_point() {
        let mut camera = Camera::new();
        let anchor = Point::new(200.0, 100.0);
        let before = camera.screen_to_page(anchor);
        camera.zoom_at(anchor, 0.5);
        let after = camera.screen_to_page(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.0001);
        assert!((camera.zoom - camera.min_zoom).abs() < f64::EPSILON);
        camera.zoom_at(Point::ZERO, 1e6);
        assert!((camera.zoom - camera.max_zoom).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_page() {
        let mut camera = Camera::new();
        camera.fit_page(Rect::new(0.0, 0.0, 3840.0, 2160.0), Size::new(1920.0, 1080.0), 0.0);
        assert!((camera.zoom - 0.5).abs() < f64::EPSILON);
        assert!(camera.offset.x.abs() < 1e-9);
        assert!(camera.offset.y.abs() < 1e-9);
    }
}
