pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Largest width or height a drawing surface will be allocated for.
pub const MAX_SURFACE_DIMENSION: u32 = 16_384;

// ── Debug rectangle ──────────────────────────────────────────────────

/// Red at alpha 0.3 (77/255).
pub const DEBUG_FILL_RGBA: [u8; 4] = [255, 0, 0, 77];
pub const DEBUG_STROKE_RGBA: [u8; 4] = [0, 0, 255, 255];
pub const DEBUG_STROKE_WIDTH: f64 = 2.0;

// ── Eyes ─────────────────────────────────────────────────────────────

/// Eye radius as a multiple of the shorter side of the eye's bounding box.
pub const EYE_SIZE_FACTOR: f64 = 2.0;
pub const PUPIL_RADIUS_FACTOR: f64 = 0.6;
/// Downward pupil shift as a fraction of the eye radius.
pub const PUPIL_OFFSET_FACTOR: f64 = 0.15;
pub const EYE_RGBA: [u8; 4] = [255, 255, 255, 255];
pub const PUPIL_RGBA: [u8; 4] = [0, 0, 0, 255];

// ── Nose ─────────────────────────────────────────────────────────────

pub const NOSE_RADIUS_FACTOR: f64 = 0.6;
pub const NOSE_RGBA: [u8; 4] = [255, 0, 0, 255];

// ── Mouth ────────────────────────────────────────────────────────────

pub const MOUTH_OUTER_WIDTH: f64 = 50.0;
pub const MOUTH_OUTER_RGBA: [u8; 4] = [255, 255, 255, 255];
pub const MOUTH_INNER_WIDTH: f64 = 20.0;
pub const MOUTH_INNER_RGBA: [u8; 4] = [255, 0, 0, 255];
/// Pixels the inner lip stroke sits below the outer one.
pub const MOUTH_INNER_OFFSET: f64 = 5.0;
