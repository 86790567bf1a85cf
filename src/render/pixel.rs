use std::collections::BTreeMap;

use crate::{
    foundation::core::{Canvas, Rgba8Premul},
    foundation::error::TesseraResult,
    render::surface::{Context2d, Surface, SurfaceHost},
};

/// A rendered frame as premultiplied RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

/// In-memory RGBA8 raster implementing [`Surface`] and [`Context2d`].
///
/// Cleared pixels are transparent. Rectangles are clipped to the surface.
#[derive(Clone, Debug)]
pub struct PixelSurface {
    size: Canvas,
    data: Vec<u8>,
    has_context: bool,
}

impl PixelSurface {
    /// Transparent surface of the given size.
    pub fn new(size: Canvas) -> Self {
        Self {
            size,
            data: vec![0; size.area().saturating_mul(4)],
            has_context: true,
        }
    }

    /// A surface that exposes no 2D context, so engines refuse to bind to it.
    pub fn detached(size: Canvas) -> Self {
        Self {
            has_context: false,
            ..Self::new(size)
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        Some(Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        })
    }

    /// Count of non-transparent pixels.
    pub fn painted_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Copy the current contents out as a frame.
    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data: self.data.clone(),
        }
    }

    fn clip(&self, x: i32, y: i32, w: u32, h: u32) -> Option<(usize, usize, usize, usize)> {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(w)).min(i64::from(self.size.width));
        let y1 = (i64::from(y) + i64::from(h)).min(i64::from(self.size.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    fn write_rect(&mut self, x: i32, y: i32, w: u32, h: u32, px: [u8; 4]) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };
        let stride = self.size.width as usize * 4;
        for row in y0..y1 {
            let start = row * stride + x0 * 4;
            let end = row * stride + x1 * 4;
            for dst in self.data[start..end].chunks_exact_mut(4) {
                dst.copy_from_slice(&px);
            }
        }
    }
}

impl Context2d for PixelSurface {
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Rgba8Premul,
    ) -> TesseraResult<()> {
        self.write_rect(x, y, w, h, color.to_array());
        Ok(())
    }

    fn clear_rect(&mut self, x: i32, y: i32, w: u32, h: u32) -> TesseraResult<()> {
        self.write_rect(x, y, w, h, Rgba8Premul::transparent().to_array());
        Ok(())
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> Canvas {
        self.size
    }

    fn set_size(&mut self, size: Canvas) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.data = vec![0; size.area().saturating_mul(4)];
    }

    fn context_2d(&mut self) -> Option<&mut dyn Context2d> {
        if self.has_context {
            Some(self as &mut dyn Context2d)
        } else {
            None
        }
    }
}

/// Named registry of [`PixelSurface`]s with a shared viewport.
#[derive(Clone, Debug)]
pub struct PixelHost {
    viewport: Canvas,
    surfaces: BTreeMap<String, PixelSurface>,
}

impl PixelHost {
    /// Empty host with the given viewport.
    pub fn new(viewport: Canvas) -> Self {
        Self {
            viewport,
            surfaces: BTreeMap::new(),
        }
    }

    /// Register `surface` under `id`, replacing any previous one.
    pub fn insert(&mut self, id: impl Into<String>, surface: PixelSurface) -> &mut Self {
        self.surfaces.insert(id.into(), surface);
        self
    }
}

impl SurfaceHost for PixelHost {
    type Surface = PixelSurface;

    fn resolve(&mut self, id: &str) -> Option<PixelSurface> {
        self.surfaces.remove(id)
    }

    fn viewport(&self) -> Canvas {
        self.viewport
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pixel.rs"]
mod tests;
