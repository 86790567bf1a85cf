use crate::{
    foundation::core::DrawRect,
    foundation::error::TesseraResult,
    foundation::random::RandomSource,
    pattern::square::{CELL, Palette, Square},
    render::square::draw_square,
    render::surface::Context2d,
};

/// Probability that a new square steps right of its anchor.
const STEP_RIGHT_P: f64 = 0.9;
/// Probability that a new square steps down from its anchor.
const STEP_DOWN_P: f64 = 0.1;
/// Probability that a new square inherits its anchor's color.
const INHERIT_COLOR_P: f64 = 0.3;

/// Result of [`Pattern::add_square`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// A square was appended to the active list.
    Accepted,
    /// The computed position left the rectangle; the pattern is now out of bounds.
    OutOfBounds,
    /// The pattern was already out of bounds; nothing was drawn from the random source.
    Blocked,
}

/// Result of [`Pattern::erase_step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EraseProgress {
    /// The oldest complete square shrank by one stage.
    Stepped,
    /// The oldest complete square finished erasing and was removed.
    Removed,
    /// There was nothing left to erase.
    Empty,
}

/// Spawn-order identifier assigned by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternId(pub u64);

/// A cluster of squares grown inside one drawing rectangle.
///
/// Squares move from `active_squares` to `complete_squares` once fully grown; the two lists
/// never share a square. A square rejected by the bounds check is in neither.
#[derive(Clone, Debug)]
pub struct Pattern {
    id: PatternId,
    rect: DrawRect,
    active_squares: Vec<Square>,
    complete_squares: Vec<Square>,
    out_of_bounds: bool,
}

impl Pattern {
    /// Empty pattern confined to `rect`.
    pub fn new(rect: DrawRect) -> Self {
        Self {
            id: PatternId::default(),
            rect,
            active_squares: Vec::new(),
            complete_squares: Vec::new(),
            out_of_bounds: false,
        }
    }

    /// Same pattern tagged with `id`.
    pub fn with_id(mut self, id: PatternId) -> Self {
        self.id = id;
        self
    }

    /// Identifier assigned at spawn.
    pub fn id(&self) -> PatternId {
        self.id
    }

    /// Bounding rectangle.
    pub fn rect(&self) -> DrawRect {
        self.rect
    }

    /// Squares still growing, oldest first.
    pub fn active_squares(&self) -> &[Square] {
        &self.active_squares
    }

    /// Fully grown squares, oldest first.
    pub fn complete_squares(&self) -> &[Square] {
        &self.complete_squares
    }

    /// Whether placement has been permanently disabled.
    pub fn is_out_of_bounds(&self) -> bool {
        self.out_of_bounds
    }

    /// Total squares currently held.
    pub fn square_count(&self) -> usize {
        self.active_squares.len() + self.complete_squares.len()
    }

    /// Place one more square.
    ///
    /// The first square lands on a random grid cell of the rectangle. Later squares follow
    /// the most recently completed one: usually one cell right, rarely one cell down. If no
    /// square has completed yet the placement starts fresh again.
    pub fn add_square(&mut self, rng: &mut dyn RandomSource) -> Placement {
        if self.out_of_bounds {
            return Placement::Blocked;
        }

        let mut color = Palette::FILL[rng.next_index(Palette::FILL.len())];

        let (x, y) = match self.complete_squares.last() {
            Some(anchor) => {
                let x = if rng.chance(STEP_RIGHT_P) {
                    anchor.x.saturating_add(CELL)
                } else {
                    anchor.x
                };
                let y = if rng.chance(STEP_DOWN_P) {
                    anchor.y.saturating_add(CELL)
                } else {
                    anchor.y
                };
                if rng.chance(INHERIT_COLOR_P) {
                    color = anchor.color;
                }
                (x, y)
            }
            None => (
                self.rect.x.saturating_add(snap_to_grid(rng.next_f64(), self.rect.w)),
                self.rect.y.saturating_add(snap_to_grid(rng.next_f64(), self.rect.h)),
            ),
        };

        if !self.rect.admits(x, y) {
            self.out_of_bounds = true;
            return Placement::OutOfBounds;
        }

        self.active_squares.push(Square::new(x, y, color));
        Placement::Accepted
    }

    /// Advance every active square one growth stage and draw it.
    ///
    /// Squares that finish move to `complete_squares` in their original order. On a drawing
    /// error the remaining squares are left for the next call and the error is returned.
    pub fn grow<C: Context2d + ?Sized>(&mut self, ctx: &mut C) -> TesseraResult<usize> {
        let mut finished = Vec::new();
        let mut failure = None;

        for (i, sq) in self.active_squares.iter_mut().enumerate() {
            let step = sq.grow();
            if let Err(e) = draw_square(ctx, sq, step.size) {
                failure = Some(e);
                break;
            }
            if step.finished {
                finished.push(i);
            }
        }

        // Back to front so earlier indices stay valid.
        let mut moved = Vec::with_capacity(finished.len());
        for &i in finished.iter().rev() {
            moved.push(self.active_squares.remove(i));
        }
        moved.reverse();
        let count = moved.len();
        self.complete_squares.extend(moved);

        match failure {
            Some(e) => Err(e),
            None => Ok(count),
        }
    }

    /// Shrink the oldest complete square by one erase stage, removing it when done.
    pub fn erase_step<C: Context2d + ?Sized>(&mut self, ctx: &mut C) -> TesseraResult<EraseProgress> {
        let Some(sq) = self.complete_squares.first_mut() else {
            return Ok(EraseProgress::Empty);
        };

        let step = sq.shrink();
        draw_square(ctx, sq, step.size)?;

        if step.finished {
            self.complete_squares.remove(0);
            Ok(EraseProgress::Removed)
        } else {
            Ok(EraseProgress::Stepped)
        }
    }
}

/// Offset of a random point along `extent`, rounded to the nearest grid line.
fn snap_to_grid(r: f64, extent: i32) -> i32 {
    let cells = (r * f64::from(extent) / f64::from(CELL)).round();
    (cells as i32).saturating_mul(CELL)
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/model.rs"]
mod tests;
