use crate::foundation::error::{TesseraError, TesseraResult};

/// Absolute frame timestamp in milliseconds, as delivered by a frame driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Millis(pub f64);

impl Millis {
    /// Timestamp `delta_ms` after `self`.
    pub fn after(self, delta_ms: f64) -> Self {
        Self(self.0 + delta_ms)
    }

    /// Strictly later than `other`.
    pub fn is_after(self, other: Millis) -> bool {
        self.0 > other.0
    }
}

/// Pixel dimensions of a drawing surface or viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas of `width x height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered.
    pub fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// Axis-aligned drawing region in surface pixels.
///
/// Patterns are confined to one of these. Extents are inclusive at the far edge for square
/// placement: a square may start exactly at `x + w` or `y + h`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DrawRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl DrawRect {
    /// Build a rectangle from its origin and extents.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle covering a whole canvas.
    pub fn full(canvas: Canvas) -> Self {
        let w = i32::try_from(canvas.width).unwrap_or(i32::MAX);
        let h = i32::try_from(canvas.height).unwrap_or(i32::MAX);
        Self { x: 0, y: 0, w, h }
    }

    /// Largest x a square may start at.
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Largest y a square may start at.
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Whether a square origin at `(x, y)` stays within the placement bounds.
    pub fn admits(self, x: i32, y: i32) -> bool {
        x <= self.right() && y <= self.bottom()
    }

    pub(crate) fn validate(self) -> TesseraResult<()> {
        if self.w < 0 || self.h < 0 {
            return Err(TesseraError::config(format!(
                "draw rect extents must be >= 0 (got w={}, h={})",
                self.w, self.h
            )));
        }
        Ok(())
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black, the cleared state of a surface.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Opaque color from straight RGB.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Bytes in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
