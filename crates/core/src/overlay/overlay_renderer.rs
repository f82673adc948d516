//! The two overlay operations exposed to collaborators.
//!
//! Each call maps normalized geometry to pixels, paints onto a private
//! drawing surface seeded from the source, and returns a new image whose
//! orientation tag is the source's reconciled tag, with pixels stored so the
//! new tag displays the same picture the source tag did. Failures yield no
//! image at all; nothing partially drawn escapes.

use crate::detection::domain::face_observation::FaceObservation;
use crate::mapping::coordinate_mapper::{landmark_bounds, map_landmark_region, map_rect};
use crate::overlay::domain::feature_selection::FeatureSelection;
use crate::overlay::domain::overlay_request::OverlayRequest;
use crate::overlay::domain::shapes::{
    debug_rect_shape, eye_shape, mouth_shape, nose_shape, Primitive,
};
use crate::overlay::infrastructure::drawing_surface::DrawingSurface;
use crate::shared::error::OverlayError;
use crate::shared::geometry::NormalizedRect;
use crate::shared::raster_image::RasterImage;

/// Highlights an image-normalized rectangle; `None` rect returns the image as is.
pub fn render_debug_rect(image: &RasterImage, rect: Option<&NormalizedRect>) -> Option<RasterImage> {
    try_render_debug_rect(image, rect)
        .map_err(|e| log::warn!("Debug rectangle render produced no result: {e}"))
        .ok()
}

pub fn try_render_debug_rect(
    image: &RasterImage,
    rect: Option<&NormalizedRect>,
) -> Result<RasterImage, OverlayError> {
    let Some(rect) = rect else {
        return Ok(image.clone());
    };

    let mut surface = DrawingSurface::acquire(image)?;
    let absolute = map_rect(rect, image.width(), image.height());
    log::debug!("Debug rectangle {rect:?} → {absolute:?}");
    for primitive in debug_rect_shape(absolute).primitives() {
        surface.paint(&primitive);
    }
    Ok(finish(image, surface))
}

/// Draws the selected clown features for every observation.
pub fn render_funny_face(
    image: &RasterImage,
    observations: &[FaceObservation],
    features: FeatureSelection,
) -> Option<RasterImage> {
    try_render_funny_face(image, observations, features)
        .map_err(|e| log::warn!("Funny face render produced no result: {e}"))
        .ok()
}

/// A full draw pass always runs, even with nothing selected, so the output
/// tag is reconciled the same way in every case.
pub fn try_render_funny_face(
    image: &RasterImage,
    observations: &[FaceObservation],
    features: FeatureSelection,
) -> Result<RasterImage, OverlayError> {
    draw_request(image, &OverlayRequest::new(observations, features))
}

fn draw_request(
    image: &RasterImage,
    request: &OverlayRequest<'_>,
) -> Result<RasterImage, OverlayError> {
    let mut surface = DrawingSurface::acquire(image)?;
    let (width, height) = surface.dimensions();
    if request.features.is_empty() {
        log::debug!("No features selected; retagging only");
    }

    for (i, observation) in request.observations.iter().enumerate() {
        let primitives = face_primitives(observation, request.features, width, height);
        log::debug!("Face {i}: {} primitive(s)", primitives.len());
        for primitive in &primitives {
            surface.paint(primitive);
        }
    }
    Ok(finish(image, surface))
}

/// Everything to paint for one face, in drawing order: eyes, nose, mouth.
///
/// Features whose landmark region is missing or empty are skipped.
pub fn face_primitives(
    observation: &FaceObservation,
    features: FeatureSelection,
    width: u32,
    height: u32,
) -> Vec<Primitive> {
    let bbox = &observation.bounding_box;
    let mut primitives = Vec::new();

    if features.eyes {
        let mut found = 0;
        for eye in observation.eyes() {
            if let Some(bounds) = landmark_bounds(eye, bbox, width, height) {
                primitives.extend(eye_shape(&bounds).primitives());
                found += 1;
            }
        }
        if found < 2 {
            log::debug!("Skipping {} missing eye(s)", 2 - found);
        }
    }

    if features.nose {
        match observation
            .nose
            .as_ref()
            .and_then(|nose| landmark_bounds(nose, bbox, width, height))
        {
            Some(bounds) => primitives.push(Primitive::FilledCircle(nose_shape(&bounds))),
            None => log::debug!("Skipping nose: no landmarks"),
        }
    }

    if features.mouth {
        match observation.outer_lips.as_ref().filter(|lips| !lips.is_empty()) {
            Some(lips) => {
                let contour = map_landmark_region(lips, bbox, width, height);
                primitives.extend(mouth_shape(&contour).primitives());
            }
            None => log::debug!("Skipping mouth: no landmarks"),
        }
    }

    primitives
}

/// Retags with the reconciled orientation and lays the pixels out so the
/// result displays like the source.
fn finish(source: &RasterImage, surface: DrawingSurface) -> RasterImage {
    let shown_as = source.orientation();
    let stored_as = shown_as.reconciled();
    source.with_rgba_pixels(surface.finish(shown_as, stored_as), stored_as)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_observation::LandmarkRegion;
    use crate::overlay::domain::shapes::Circle;
    use crate::shared::constants::MAX_SURFACE_DIMENSION;
    use crate::shared::geometry::NormalizedPoint;
    use crate::shared::orientation::Orientation;
    use image::DynamicImage;

    const W: u32 = 400;
    const H: u32 = 400;
    const BG: u8 = 60;

    fn image(orientation: Orientation) -> RasterImage {
        let data = vec![BG; (W * H * 3) as usize];
        RasterImage::new(data, W, H, 3, 2.0, orientation)
    }

    fn region(points: &[(f64, f64)]) -> LandmarkRegion {
        LandmarkRegion::new(
            points
                .iter()
                .map(|&(x, y)| NormalizedPoint::new(x, y))
                .collect(),
        )
    }

    /// A face with every landmark region, in a box of the given placement.
    fn face(bbox: NormalizedRect) -> FaceObservation {
        FaceObservation {
            bounding_box: bbox,
            left_eye: Some(region(&[(0.25, 0.75), (0.35, 0.78), (0.30, 0.72)])),
            right_eye: Some(region(&[(0.65, 0.75), (0.75, 0.78), (0.70, 0.72)])),
            nose: Some(region(&[(0.45, 0.55), (0.55, 0.55), (0.50, 0.45)])),
            outer_lips: Some(region(&[
                (0.30, 0.25),
                (0.50, 0.30),
                (0.70, 0.25),
                (0.50, 0.15),
            ])),
        }
    }

    fn centered_face() -> FaceObservation {
        face(NormalizedRect::new(0.25, 0.25, 0.5, 0.5))
    }

    fn only(eyes: bool, nose: bool, mouth: bool) -> FeatureSelection {
        FeatureSelection { eyes, nose, mouth }
    }

    /// Distinct byte per position, so any relayout shows up.
    fn patterned(orientation: Orientation) -> RasterImage {
        let data = (0..W * H)
            .flat_map(|i| [(i % 251) as u8, (i / W) as u8, (i % W) as u8])
            .collect();
        RasterImage::new(data, W, H, 3, 1.0, orientation)
    }

    /// What a viewer honoring the tag presents.
    fn displayed(img: &RasterImage) -> RasterImage {
        let mut shown = DynamicImage::ImageRgba8(img.to_rgba().unwrap());
        shown.apply_orientation(img.orientation().into());
        img.with_rgba_pixels(shown.into_rgba8(), Orientation::Up)
    }

    fn changed_pixels(a: &RasterImage, b: &RasterImage) -> Vec<(u32, u32)> {
        let mut changed = Vec::new();
        for y in 0..a.height() {
            for x in 0..a.width() {
                if a.pixel(x, y) != b.pixel(x, y) {
                    changed.push((x, y));
                }
            }
        }
        changed
    }

    // ── Debug rectangle ──────────────────────────────────────────────

    #[test]
    fn test_debug_rect_none_returns_identical_image() {
        let src = image(Orientation::Right);
        let out = render_debug_rect(&src, None).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_debug_rect_tints_inside_and_retags() {
        let src = image(Orientation::Up);
        let rect = NormalizedRect::new(0.25, 0.25, 0.5, 0.5);
        let out = render_debug_rect(&src, Some(&rect)).unwrap();
        let shown = displayed(&out);

        let inside = shown.pixel(200, 200);
        assert!(inside[0] > BG, "red should rise inside the rect");
        assert!(inside[1] < BG, "green should fall inside the rect");
        assert_eq!(shown.pixel(10, 10), &[BG, BG, BG]);
        // top edge at y=100 stroked blue, on screen as in the buffer drawn
        assert_eq!(shown.pixel(200, 100), &[0, 0, 255]);
        assert_eq!(shown.pixel(200, 99), &[0, 0, 255]);
        assert_eq!(shown.pixel(200, 102), shown.pixel(200, 200));
        assert_eq!(out.orientation(), Orientation::DownMirrored);
        assert_eq!(out.scale(), 2.0);
    }

    #[test]
    fn test_debug_rect_unreadable_image_is_none() {
        let broken = RasterImage::new(vec![0u8; 3], W, H, 3, 1.0, Orientation::Up);
        let rect = NormalizedRect::new(0.0, 0.0, 1.0, 1.0);
        assert!(render_debug_rect(&broken, Some(&rect)).is_none());
    }

    #[test]
    fn test_debug_rect_surface_unavailable_is_none() {
        let huge = RasterImage::new(Vec::new(), MAX_SURFACE_DIMENSION * 2, 1, 4, 1.0, Orientation::Up);
        let rect = NormalizedRect::new(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            try_render_debug_rect(&huge, Some(&rect)),
            Err(OverlayError::SurfaceUnavailable { .. })
        ));
        assert!(render_debug_rect(&huge, Some(&rect)).is_none());
    }

    // ── Funny face: failure policy ───────────────────────────────────

    #[test]
    fn test_funny_face_unreadable_image_is_none() {
        let broken = RasterImage::new(vec![0u8; 12], 2, 2, 2, 1.0, Orientation::Up);
        assert!(render_funny_face(&broken, &[centered_face()], FeatureSelection::all()).is_none());
    }

    #[test]
    fn test_source_is_never_mutated() {
        let src = image(Orientation::Up);
        let before = src.clone();
        let _ = render_funny_face(&src, &[centered_face()], FeatureSelection::all()).unwrap();
        assert_eq!(src, before);
    }

    // ── Funny face: orientation and layout ───────────────────────────

    #[test]
    fn test_output_keeps_dimensions_scale_and_layout() {
        let src = image(Orientation::Left);
        let out = render_funny_face(&src, &[centered_face()], FeatureSelection::all()).unwrap();
        assert_eq!((out.width(), out.height()), (W, H));
        assert_eq!(out.channels(), 3);
        assert_eq!(out.scale(), 2.0);
        assert_eq!(out.orientation(), Orientation::RightMirrored);
    }

    #[test]
    fn test_every_source_tag_is_reconciled() {
        for o in Orientation::ALL {
            let out = render_funny_face(&image(o), &[], FeatureSelection::all()).unwrap();
            assert_eq!(out.orientation(), o.reconciled());
        }
    }

    #[test]
    fn test_no_features_displays_like_source_for_every_tag() {
        for o in Orientation::ALL {
            let src = patterned(o);
            let out =
                render_funny_face(&src, &[centered_face()], FeatureSelection::none()).unwrap();
            assert_eq!(out.orientation(), o.reconciled());
            assert_eq!((out.width(), out.height()), (W, H));
            assert_eq!(displayed(&out), displayed(&src), "source tagged {o}");
        }
    }

    #[test]
    fn test_untagged_source_is_stored_row_flipped() {
        let src = patterned(Orientation::Up);
        let out = render_funny_face(&src, &[], FeatureSelection::none()).unwrap();
        assert_eq!(out.orientation(), Orientation::DownMirrored);
        assert_eq!(out.pixel(7, 0), src.pixel(7, H - 1));
        assert_eq!(out.pixel(7, H - 1), src.pixel(7, 0));
    }

    #[test]
    fn test_debug_rect_displays_like_source_for_every_tag() {
        let rect = NormalizedRect::new(2.0, 2.0, 0.1, 0.1);
        for o in Orientation::ALL {
            let src = patterned(o);
            let out = render_debug_rect(&src, Some(&rect)).unwrap();
            assert_eq!(displayed(&out), displayed(&src), "source tagged {o}");
        }
    }

    #[test]
    fn test_rgba_source_stays_rgba() {
        let data = vec![BG; (W * H * 4) as usize];
        let src = RasterImage::new(data, W, H, 4, 1.0, Orientation::Up);
        let out = render_funny_face(&src, &[centered_face()], only(false, true, false)).unwrap();
        assert_eq!(out.channels(), 4);
        assert_eq!(out.data().len(), src.data().len());
    }

    // ── Funny face: feature drawing ──────────────────────────────────

    #[test]
    fn test_nose_only_changes_pixels_inside_nose_circle() {
        let src = image(Orientation::Up);
        let obs = centered_face();
        let out = displayed(
            &render_funny_face(&src, &[obs.clone()], only(false, true, false)).unwrap(),
        );

        let bounds = landmark_bounds(obs.nose.as_ref().unwrap(), &obs.bounding_box, W, H).unwrap();
        let Circle { center, radius, .. } = nose_shape(&bounds);
        let changed = changed_pixels(&src, &out);

        assert!(!changed.is_empty());
        for (x, y) in changed {
            let (dx, dy) = (x as f64 - center.x, y as f64 - center.y);
            assert!(
                (dx * dx + dy * dy).sqrt() <= radius.round() + 1.0,
                "pixel ({x},{y}) outside nose circle"
            );
        }
        let c = out.pixel(center.x.round() as u32, center.y.round() as u32);
        assert_eq!(c, &[255, 0, 0]);
    }

    #[test]
    fn test_eyes_draw_white_with_black_pupil() {
        let src = image(Orientation::Up);
        let obs = centered_face();
        let out = displayed(
            &render_funny_face(&src, &[obs.clone()], only(true, false, false)).unwrap(),
        );

        let bounds =
            landmark_bounds(obs.left_eye.as_ref().unwrap(), &obs.bounding_box, W, H).unwrap();
        let eye = eye_shape(&bounds);
        let pupil = out.pixel(eye.pupil.center.x.round() as u32, eye.pupil.center.y.round() as u32);
        assert_eq!(pupil, &[0, 0, 0]);
        // near the top of the white, above the lowered pupil
        let rim_y = (eye.white.center.y - eye.white.radius * 0.9).round() as u32;
        let rim = out.pixel(eye.white.center.x.round() as u32, rim_y);
        assert_eq!(rim, &[255, 255, 255]);
    }

    #[test]
    fn test_mouth_draws_red_inner_over_white_outer() {
        let src = image(Orientation::Up);
        let obs = centered_face();
        let out = displayed(
            &render_funny_face(&src, &[obs.clone()], only(false, false, true)).unwrap(),
        );

        let lips = map_landmark_region(obs.outer_lips.as_ref().unwrap(), &obs.bounding_box, W, H);
        // a contour vertex shifted 5px down sits on the inner (red) stroke
        let v = lips[0];
        assert_eq!(out.pixel(v.x.round() as u32, (v.y + 5.0).round() as u32), &[255, 0, 0]);
        // 20px above the vertex is outside the red band but inside the white one
        assert_eq!(out.pixel(v.x.round() as u32, (v.y - 18.0).round() as u32), &[255, 255, 255]);
    }

    #[test]
    fn test_primitive_order_eyes_nose_mouth() {
        let prims = face_primitives(&centered_face(), FeatureSelection::all(), W, H);
        assert_eq!(prims.len(), 7);
        assert!(matches!(prims[0], Primitive::FilledCircle(ref c) if c.rgba == [255, 255, 255, 255]));
        assert!(matches!(prims[1], Primitive::FilledCircle(ref c) if c.rgba == [0, 0, 0, 255]));
        assert!(matches!(prims[2], Primitive::FilledCircle(ref c) if c.rgba == [255, 255, 255, 255]));
        assert!(matches!(prims[3], Primitive::FilledCircle(ref c) if c.rgba == [0, 0, 0, 255]));
        assert!(matches!(prims[4], Primitive::FilledCircle(ref c) if c.rgba == [255, 0, 0, 255]));
        assert!(matches!(prims[5], Primitive::ClosedStroke(ref s) if s.width == 50.0));
        assert!(matches!(prims[6], Primitive::ClosedStroke(ref s) if s.width == 20.0));
    }

    // ── Missing and empty landmarks ──────────────────────────────────

    #[test]
    fn test_missing_nose_still_draws_eyes_and_mouth() {
        let mut obs = centered_face();
        obs.nose = None;
        let prims = face_primitives(&obs, FeatureSelection::all(), W, H);
        assert_eq!(prims.len(), 6);
        assert!(!prims
            .iter()
            .any(|p| matches!(p, Primitive::FilledCircle(c) if c.rgba == [255, 0, 0, 255])));

        let src = image(Orientation::Up);
        let out = render_funny_face(&src, &[obs], FeatureSelection::all()).unwrap();
        assert_ne!(out.data(), src.data());
    }

    #[test]
    fn test_empty_regions_count_as_missing() {
        let mut obs = centered_face();
        obs.left_eye = Some(LandmarkRegion::default());
        obs.nose = Some(LandmarkRegion::default());
        obs.outer_lips = Some(LandmarkRegion::default());
        let prims = face_primitives(&obs, FeatureSelection::all(), W, H);
        // only the right eye remains
        assert_eq!(prims.len(), 2);
    }

    #[test]
    fn test_face_without_landmarks_draws_nothing() {
        let obs = FaceObservation::new(NormalizedRect::new(0.1, 0.1, 0.3, 0.3));
        let src = image(Orientation::Up);
        let out = render_funny_face(&src, &[obs], FeatureSelection::all()).unwrap();
        assert_eq!(displayed(&out), src);
    }

    // ── Out-of-range landmarks ───────────────────────────────────────

    fn nose_face(points: &[(f64, f64)]) -> FaceObservation {
        let mut obs = FaceObservation::new(NormalizedRect::new(0.0, 0.0, 1.0, 1.0));
        obs.nose = Some(region(points));
        obs
    }

    #[test]
    fn test_far_off_canvas_nose_leaves_image_untouched() {
        let src = RasterImage::new(vec![BG; 100 * 100 * 3], 100, 100, 3, 1.0, Orientation::Up);
        let obs = nose_face(&[(0.0, 0.0), (1000.0, 1000.0)]);
        let out = render_funny_face(&src, &[obs], only(false, true, false)).unwrap();
        assert_eq!(displayed(&out), src);
    }

    #[test]
    fn test_huge_nose_covering_canvas_paints_all_of_it() {
        let src = RasterImage::new(vec![BG; 100 * 100 * 3], 100, 100, 3, 1.0, Orientation::Up);
        let obs = nose_face(&[(-1000.0, -1000.0), (1000.0, 1000.0)]);
        let out = render_funny_face(&src, &[obs], only(false, true, false)).unwrap();
        assert!(out.data().chunks_exact(3).all(|px| px == [255, 0, 0]));
    }

    #[test]
    fn test_huge_lip_contour_still_renders() {
        let src = RasterImage::new(vec![BG; 100 * 100 * 3], 100, 100, 3, 1.0, Orientation::Up);
        let mut obs = FaceObservation::new(NormalizedRect::new(0.0, 0.0, 1.0, 1.0));
        obs.outer_lips = Some(region(&[(0.5, 0.5), (1.0e9, 0.5), (0.5, -1.0e9)]));
        let out = render_funny_face(&src, &[obs], only(false, false, true)).unwrap();
        assert_eq!(displayed(&out).pixel(50, 50), &[255, 0, 0]);
    }

    // ── Multiple faces ───────────────────────────────────────────────

    #[test]
    fn test_two_faces_render_independently() {
        let a = face(NormalizedRect::new(0.0, 0.5, 0.4, 0.4));
        let b = face(NormalizedRect::new(0.55, 0.05, 0.4, 0.4));

        let alone_a = face_primitives(&a, FeatureSelection::all(), W, H);
        let alone_b = face_primitives(&b, FeatureSelection::all(), W, H);
        assert_eq!(alone_a.len(), 7);
        assert_eq!(alone_b.len(), 7);
        assert_ne!(alone_a, alone_b);

        let src = image(Orientation::Up);
        let both = displayed(
            &render_funny_face(&src, &[a.clone(), b.clone()], FeatureSelection::all()).unwrap(),
        );

        for obs in [&a, &b] {
            let nose = landmark_bounds(obs.nose.as_ref().unwrap(), &obs.bounding_box, W, H)
                .unwrap()
                .center();
            assert_eq!(
                both.pixel(nose.x.round() as u32, nose.y.round() as u32),
                &[255, 0, 0]
            );
        }
    }

    #[test]
    fn test_face_order_follows_detector_order() {
        // Identical faces drawn twice: the second pass paints over the first.
        let obs = centered_face();
        let once = render_funny_face(&image(Orientation::Up), &[obs.clone()], FeatureSelection::all())
            .unwrap();
        let twice = render_funny_face(
            &image(Orientation::Up),
            &[obs.clone(), obs],
            FeatureSelection::all(),
        )
        .unwrap();
        assert_eq!(once.data(), twice.data());
    }
}
