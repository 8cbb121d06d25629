/// RGB color for DeviceRGB fill and stroke operators.
///
/// Each component is in the range 0.0 (none) to 1.0 (full intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Color from 8-bit components (0–255).
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    pub fn gray(level: f64) -> Self {
        Color {
            r: level,
            g: level,
            b: level,
        }
    }

    /// Scale every component by `factor`, clamped to 0.0–1.0.
    pub fn scaled(&self, factor: f64) -> Self {
        let f = |c: f64| (c * factor).clamp(0.0, 1.0);
        Color {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }
}

/// Bezier control distance for a quarter circle of radius 1.
pub const KAPPA: f64 = 4.0 / 3.0 * (std::f64::consts::SQRT_2 - 1.0);

/// One cubic segment: two control points and the end point.
pub type Curve = [(f64, f64); 3];

/// Approximate an axis-aligned ellipse with four cubic arcs.
///
/// Returns the start point (rightmost point of the ellipse) and the
/// four segments, counter-clockwise.
pub fn ellipse_curves(cx: f64, cy: f64, rx: f64, ry: f64) -> ((f64, f64), [Curve; 4]) {
    let kx = KAPPA * rx;
    let ky = KAPPA * ry;
    let start = (cx + rx, cy);
    let curves = [
        [(cx + rx, cy + ky), (cx + kx, cy + ry), (cx, cy + ry)],
        [(cx - kx, cy + ry), (cx - rx, cy + ky), (cx - rx, cy)],
        [(cx - rx, cy - ky), (cx - kx, cy - ry), (cx, cy - ry)],
        [(cx + kx, cy - ry), (cx + rx, cy - ky), (cx + rx, cy)],
    ];
    (start, curves)
}
