use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_polygon_mut, Blend,
};
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::overlay::domain::shapes::{Circle, ClosedStroke, Primitive};
use crate::shared::constants::MAX_SURFACE_DIMENSION;
use crate::shared::error::OverlayError;
use crate::shared::geometry::{AbsolutePoint, AbsoluteRect};
use crate::shared::orientation::Orientation;
use crate::shared::raster_image::RasterImage;

/// Off-screen RGBA canvas scoped to one render call.
///
/// Holds a private copy of the source pixels in their stored (unrotated)
/// layout. Dropping the surface releases it; `finish` hands the pixels back.
///
/// Geometry far outside the canvas is cut down to the part that can touch
/// it, so painting costs at most a pass over the canvas whatever the input.
pub struct DrawingSurface {
    pixels: RgbaImage,
}

impl DrawingSurface {
    /// Allocates a surface seeded with the source image's pixels.
    pub fn acquire(source: &RasterImage) -> Result<Self, OverlayError> {
        let (width, height) = (source.width(), source.height());
        if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
            return Err(OverlayError::SurfaceUnavailable { width, height });
        }
        let pixels = source.to_rgba()?;
        Ok(Self { pixels })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn paint(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::FilledCircle(circle) => self.fill_circle(circle),
            Primitive::ClosedStroke(stroke) => self.stroke_closed(stroke),
            Primitive::FilledRect { rect, rgba } => self.fill_rect_blended(rect, *rgba),
            Primitive::StrokedRect { rect, width, rgba } => self.stroke_rect(rect, *width, *rgba),
        }
    }

    /// Releases the pixels laid out for a new tag.
    ///
    /// The drawn buffer is what a viewer honoring `shown_as` would present;
    /// the returned buffer shows the same picture under `stored_as`.
    pub fn finish(self, shown_as: Orientation, stored_as: Orientation) -> RgbaImage {
        if shown_as == stored_as {
            return self.pixels;
        }
        let mut img = DynamicImage::ImageRgba8(self.pixels);
        img.apply_orientation(shown_as.into());
        img.apply_orientation(stored_as.inverse().into());
        img.into_rgba8()
    }

    /// Canvas diagonal, rounded up.
    fn reach(&self) -> f64 {
        let (w, h) = self.dimensions();
        (w as f64).hypot(h as f64).ceil()
    }

    fn fill_circle(&mut self, circle: &Circle) {
        let Circle {
            center,
            radius,
            rgba,
        } = circle;
        if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
            return;
        }
        let r = radius.round();
        if r <= 0.0 {
            return;
        }
        let (w, h) = self.dimensions();
        if center.x + r < 0.0 || center.y + r < 0.0 || center.x - r > w as f64 || center.y - r > h as f64
        {
            return;
        }

        if r <= self.reach() {
            draw_filled_circle_mut(&mut self.pixels, to_pixel(center), r as i32, Rgba(*rgba));
        } else {
            self.fill_circle_rows(center, r, Rgba(*rgba));
        }
    }

    /// One clipped span per canvas row; used when the radius dwarfs the canvas.
    fn fill_circle_rows(&mut self, center: &AbsolutePoint, r: f64, color: Rgba<u8>) {
        let (w, h) = self.dimensions();
        let last_x = w as f64 - 1.0;
        for y in 0..h {
            let dy = y as f64 - center.y;
            if dy.abs() > r {
                continue;
            }
            let half = (r * r - dy * dy).sqrt();
            let x0 = (center.x - half).round().max(0.0);
            let x1 = (center.x + half).round().min(last_x);
            if x1 < x0 {
                continue;
            }
            let span = Rect::at(x0 as i32, y as i32).of_size((x1 - x0) as u32 + 1, 1);
            draw_filled_rect_mut(&mut self.pixels, span, color);
        }
    }

    /// Thick closed polyline: one quad per segment plus round joins.
    fn stroke_closed(&mut self, stroke: &ClosedStroke) {
        let (w, h) = self.dimensions();
        let half = (stroke.width / 2.0).min(self.reach());
        if !half.is_finite() {
            return;
        }
        let margin = half + 2.0;
        let (min, max) = ((-margin, -margin), (w as f64 + margin, h as f64 + margin));
        let color = Rgba(stroke.rgba);
        let n = stroke.points.len();

        for i in 0..n {
            let a = &stroke.points[i];
            let b = &stroke.points[(i + 1) % n];
            let Some((a, b)) = clip_segment(a, b, min, max) else {
                continue;
            };
            if let Some(quad) = segment_quad(&a, &b, half) {
                draw_polygon_mut(&mut self.pixels, &quad, color);
            }
        }

        for p in &stroke.points {
            self.fill_circle(&Circle {
                center: *p,
                radius: half,
                rgba: stroke.rgba,
            });
        }
    }

    fn fill_rect_blended(&mut self, rect: &AbsoluteRect, rgba: [u8; 4]) {
        let Some(r) = pixel_rect(rect, 0, self.dimensions()) else {
            return;
        };
        let mut canvas = Blend(std::mem::take(&mut self.pixels));
        draw_filled_rect_mut(&mut canvas, r, Rgba(rgba));
        self.pixels = canvas.0;
    }

    /// Border of `width` pixels straddling the rectangle's edges.
    fn stroke_rect(&mut self, rect: &AbsoluteRect, width: f64, rgba: [u8; 4]) {
        let lines = width.round().clamp(0.0, self.reach()) as i32;
        let outset = lines / 2;
        for inset in -outset..(lines - outset) {
            if let Some(r) = pixel_rect(rect, inset, self.dimensions()) {
                draw_hollow_rect_mut(&mut self.pixels, r, Rgba(rgba));
            }
        }
    }
}

fn to_pixel(p: &AbsolutePoint) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

/// Integer rectangle shrunk by `inset` on every side (negative grows it).
///
/// Edges beyond the canvas are pulled in to just outside it, so they stay
/// off-canvas after the inset.
fn pixel_rect(rect: &AbsoluteRect, inset: i32, (w, h): (u32, u32)) -> Option<Rect> {
    let edges = [rect.x, rect.y, rect.right(), rect.bottom()];
    if !edges.iter().all(|v| v.is_finite()) {
        return None;
    }
    let slack = inset.abs() as f64 + 2.0;
    let clamp = |v: f64, limit: u32| v.round().clamp(-slack, limit as f64 + slack) as i32;
    let x0 = clamp(rect.x, w) + inset;
    let y0 = clamp(rect.y, h) + inset;
    let x1 = clamp(rect.right(), w) - inset;
    let y1 = clamp(rect.bottom(), h) - inset;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::at(x0, y0).of_size((x1 - x0) as u32, (y1 - y0) as u32))
}

/// Part of segment `a → b` inside the box `min..max` (Liang-Barsky).
fn clip_segment(
    a: &AbsolutePoint,
    b: &AbsolutePoint,
    min: (f64, f64),
    max: (f64, f64),
) -> Option<(AbsolutePoint, AbsolutePoint)> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    if ![a.x, a.y, dx, dy].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-dx, a.x - min.0),
        (dx, max.0 - a.x),
        (-dy, a.y - min.1),
        (dy, max.1 - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((
        AbsolutePoint::new(a.x + t0 * dx, a.y + t0 * dy),
        AbsolutePoint::new(a.x + t1 * dx, a.y + t1 * dy),
    ))
}

/// Corners of the band `half` pixels either side of segment `a → b`.
fn segment_quad(a: &AbsolutePoint, b: &AbsolutePoint, half: f64) -> Option<[Point<i32>; 4]> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return None;
    }
    let (nx, ny) = (-dy / len * half, dx / len * half);
    let corner = |p: &AbsolutePoint, sign: f64| {
        Point::new((p.x + sign * nx).round() as i32, (p.y + sign * ny).round() as i32)
    };
    let quad = [corner(a, 1.0), corner(b, 1.0), corner(b, -1.0), corner(a, -1.0)];
    if quad[0] == quad[3] {
        return None;
    }
    Some(quad)
}
