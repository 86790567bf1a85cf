use crate::{
    foundation::error::TesseraResult,
    pattern::square::{CELL, Square},
    render::surface::Context2d,
};

/// Largest size a square may be drawn at; it never leaves its grid cell.
pub const MAX_DRAW_SIZE: u32 = CELL as u32;

/// What [`draw_square`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The inset region was painted with the square's color.
    Filled,
    /// The square carries the erase color; the inset region was cleared.
    Cleared,
    /// The size exceeded a cell; nothing was drawn.
    Skipped,
}

impl DrawOutcome {
    /// `false` only for [`DrawOutcome::Skipped`].
    pub fn is_drawn(self) -> bool {
        !matches!(self, DrawOutcome::Skipped)
    }
}

/// Draw or erase `square` at `size` pixels, inset by `CELL - size` inside its cell.
pub fn draw_square<C: Context2d + ?Sized>(
    ctx: &mut C,
    square: &Square,
    size: u32,
) -> TesseraResult<DrawOutcome> {
    if size > MAX_DRAW_SIZE {
        return Ok(DrawOutcome::Skipped);
    }

    // size <= CELL so the inset fits in i32.
    let border = (MAX_DRAW_SIZE - size) as i32;
    let x = square.x.saturating_add(border);
    let y = square.y.saturating_add(border);

    if square.color.is_erase() {
        ctx.clear_rect(x, y, size, size)?;
        Ok(DrawOutcome::Cleared)
    } else {
        ctx.fill_rect(x, y, size, size, square.color.rgba())?;
        Ok(DrawOutcome::Filled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/square.rs"]
mod tests;
