use crate::foundation::error::{ViewError, ViewResult};

pub use kurbo::{Point, Rect, Size};

/// Three-component vector used for render-space position and scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Componentwise `self + (target - self) * t`.
    pub fn lerp(self, target: Vec3, t: f64) -> Vec3 {
        Vec3 {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
            z: self.z + (target.z - self.z) * t,
        }
    }

    /// Largest absolute componentwise difference.
    pub fn max_abs_diff(self, other: Vec3) -> f64 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

/// Per-tick interpolation weight, always in `(0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Smoothing(f64);

impl Smoothing {
    pub const DEFAULT: Smoothing = Smoothing(0.1);

    pub fn new(alpha: f64) -> ViewResult<Self> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            return Err(ViewError::validation(format!(
                "smoothing factor must be in (0, 1], got {alpha}"
            )));
        }
        Ok(Self(alpha))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<'de> serde::Deserialize<'de> for Smoothing {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let alpha = f64::deserialize(d)?;
        Smoothing::new(alpha).map_err(serde::de::Error::custom)
    }
}

/// Viewport dimensions as plain serde data, used by config files.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportDef {
    pub width: f64,
    pub height: f64,
}

impl ViewportDef {
    pub fn validate(self) -> ViewResult<Self> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ViewError::validation("viewport width and height must be > 0"));
        }
        Ok(self)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Element bounding box in viewport pixels, the way layout APIs report it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }
}

impl From<Rect> for ClientRect {
    fn from(r: Rect) -> Self {
        Self {
            left: r.x0,
            top: r.y0,
            width: r.width(),
            height: r.height(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
