//! Radar geometry and the pixel-to-gaze coordinate mapping.
//!
//! The radar is a circle drawn on a square canvas.  Pixel coordinates grow to
//! the right and downwards; gaze coordinates span `[-50, 50]` on both axes and
//! grow to the right and upwards.  A pointer outside the circle snaps to the
//! centre rather than to the nearest point on the rim.

use thiserror::Error;

/// Half-width of the gaze output range on each axis.
pub const GAZE_LIMIT: f64 = 50.0;

/// Side length of the default square canvas, in pixels.
pub const DEFAULT_CANVAS_SIZE: i32 = 400;

/// Blank border between the canvas edge and the radar circle, in pixels.
pub const DEFAULT_MARGIN: i32 = 20;

/// Errors that can occur when building a [`RadarGeometry`].
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// The circle would have no area.
    #[error("radar radius must be positive, got {0}")]
    NonPositiveRadius(i32),

    /// The margin eats the whole canvas.
    #[error("a {size}px canvas leaves no room for the radar inside a {margin}px margin")]
    CanvasTooSmall { size: i32, margin: i32 },

    #[error("radar margin must not be negative, got {0}")]
    NegativeMargin(i32),
}

/// A pointer position in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A gaze target in normalized units, each axis in `[-50, 50]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazePoint {
    pub x: f64,
    pub y: f64,
}

/// Immutable description of the radar circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarGeometry {
    center: PixelPoint,
    radius: i32,
}

impl RadarGeometry {
    /// Creates a radar centred on `center` with the given pixel radius.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveRadius`] if `radius <= 0`.
    pub fn new(center: PixelPoint, radius: i32) -> Result<Self, GeometryError> {
        if radius <= 0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }

    /// Lays the radar out on a square canvas of `size` pixels with `margin`
    /// pixels of blank border on every side.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eyemech_core::{PixelPoint, RadarGeometry};
    ///
    /// let radar = RadarGeometry::from_canvas(400, 20).unwrap();
    /// assert_eq!(radar.center(), PixelPoint::new(200, 200));
    /// assert_eq!(radar.radius(), 180);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NegativeMargin`] for `margin < 0` and
    /// [`GeometryError::CanvasTooSmall`] when `margin >= size / 2`.
    pub fn from_canvas(size: i32, margin: i32) -> Result<Self, GeometryError> {
        if margin < 0 {
            return Err(GeometryError::NegativeMargin(margin));
        }
        let half = size / 2;
        match half.checked_sub(margin) {
            Some(radius) if radius > 0 => Self::new(PixelPoint::new(half, half), radius),
            _ => Err(GeometryError::CanvasTooSmall { size, margin }),
        }
    }

    pub fn center(&self) -> PixelPoint {
        self.center
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Returns `true` if `point` lies inside or on the circle.
    pub fn contains(&self, point: PixelPoint) -> bool {
        let dx = i64::from(point.x) - i64::from(self.center.x);
        let dy = i64::from(point.y) - i64::from(self.center.y);
        let r = i64::from(self.radius);
        dx * dx + dy * dy <= r * r
    }

    /// Returns `point` unchanged if it is on the radar, otherwise the centre.
    pub fn clamp(&self, point: PixelPoint) -> PixelPoint {
        if self.contains(point) {
            point
        } else {
            self.center
        }
    }

    /// Maps a pointer position to a gaze target.
    ///
    /// Positions outside the circle map to the centre.  The y axis is flipped
    /// so that pointing above the centre yields a positive gaze.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use eyemech_core::{PixelPoint, RadarGeometry};
    ///
    /// let radar = RadarGeometry::from_canvas(400, 20).unwrap();
    /// let top = radar.map(PixelPoint::new(200, 20));
    /// assert_eq!((top.x, top.y), (0.0, 50.0));
    /// ```
    pub fn map(&self, point: PixelPoint) -> GazePoint {
        let p = self.clamp(point);
        GazePoint {
            x: interp(p.x, self.center.x, self.radius),
            y: -interp(p.y, self.center.y, self.radius),
        }
    }
}

impl Default for RadarGeometry {
    /// The 400×400 canvas with a 20 px margin used by the original panel.
    fn default() -> Self {
        let half = DEFAULT_CANVAS_SIZE / 2;
        Self {
            center: PixelPoint::new(half, half),
            radius: half - DEFAULT_MARGIN,
        }
    }
}

/// Linear map of `value` from `[center - radius, center + radius]` onto
/// `[-GAZE_LIMIT, GAZE_LIMIT]`.
///
/// Done in `f64`, which holds every `i32` sum exactly.
fn interp(value: i32, center: i32, radius: i32) -> f64 {
    let lo = f64::from(center) - f64::from(radius);
    let hi = f64::from(center) + f64::from(radius);
    let t = (f64::from(value) - lo) / (hi - lo);
    -GAZE_LIMIT + t * (2.0 * GAZE_LIMIT)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
