use crate::foundation::{core::Canvas, core::Rgba8Premul, error::TesseraResult};

/// The two 2D drawing primitives the engine paints with.
///
/// Rectangles use surface pixel coordinates and may extend past the surface edges;
/// implementations clip.
pub trait Context2d {
    /// Paint `[x, y, w, h]` with `color`.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba8Premul)
    -> TesseraResult<()>;

    /// Reset `[x, y, w, h]` to the surface background.
    fn clear_rect(&mut self, x: i32, y: i32, w: u32, h: u32) -> TesseraResult<()>;
}

/// A drawing target with settable pixel dimensions.
pub trait Surface {
    /// Current pixel dimensions.
    fn size(&self) -> Canvas;

    /// Set pixel dimensions. Setting the current size again must leave contents untouched.
    fn set_size(&mut self, size: Canvas);

    /// The 2D drawing context, or `None` when the surface cannot draw in 2D.
    fn context_2d(&mut self) -> Option<&mut dyn Context2d>;
}

/// Resolves surfaces by identifier and reports the current viewport.
pub trait SurfaceHost {
    /// Surface type handed out by this host.
    type Surface: Surface;

    /// Take ownership of the surface named `id`, if it exists.
    fn resolve(&mut self, id: &str) -> Option<Self::Surface>;

    /// Current viewport size that started engines are fitted to.
    fn viewport(&self) -> Canvas;
}
