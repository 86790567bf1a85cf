use crate::foundation::core::Rgba8Premul;

/// Edge length of the grid cell a square occupies, in pixels.
pub const CELL: i32 = 10;

/// Highest growth stage; a square drawn at this stage is fully grown.
pub const MAX_STAGE: u8 = 5;

/// Drawn size per growth stage, keyed by the stage before the step.
const GROW_SIZES: [u32; 6] = [1, 2, 4, 6, 8, 10];

/// Drawn size per erase stage, keyed by the stage before the step.
///
/// Not the reverse of [`GROW_SIZES`] read backwards by stage: a fully grown square is first
/// cleared at size 1 and the cleared area widens as the stage falls.
const ERASE_SIZES: [u32; 6] = [10, 8, 6, 4, 2, 1];

/// Fixed square palette. [`Palette::Erase`] is the background sentinel used while erasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Palette {
    /// `#e4701e`
    Ember,
    /// `#33e986`
    Mint,
    /// `#fff16e`
    Lemon,
    /// `#ff00ff`
    Magenta,
    /// `#00b1b0`
    Teal,
    /// `#e37fd2`
    Orchid,
    /// Background; drawing a square in this color clears it.
    Erase,
}

impl Palette {
    /// Colors a new square may be drawn in.
    pub const FILL: [Palette; 6] = [
        Palette::Ember,
        Palette::Mint,
        Palette::Lemon,
        Palette::Magenta,
        Palette::Teal,
        Palette::Orchid,
    ];

    /// Whether this is the erase sentinel.
    pub fn is_erase(self) -> bool {
        matches!(self, Palette::Erase)
    }

    /// Concrete pixel color.
    pub fn rgba(self) -> Rgba8Premul {
        match self {
            Palette::Ember => Rgba8Premul::opaque(0xe4, 0x70, 0x1e),
            Palette::Mint => Rgba8Premul::opaque(0x33, 0xe9, 0x86),
            Palette::Lemon => Rgba8Premul::opaque(0xff, 0xf1, 0x6e),
            Palette::Magenta => Rgba8Premul::opaque(0xff, 0x00, 0xff),
            Palette::Teal => Rgba8Premul::opaque(0x00, 0xb1, 0xb0),
            Palette::Orchid => Rgba8Premul::opaque(0xe3, 0x7f, 0xd2),
            Palette::Erase => Rgba8Premul::opaque(0xff, 0xff, 0xff),
        }
    }
}

/// One animation step of a square: the size to draw and whether the animation just ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Size to draw at, in pixels.
    pub size: u32,
    /// The square reached its terminal state with this step.
    pub finished: bool,
}

/// Atomic growth unit: a grid-aligned colored square with a discrete stage in `0..=5`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Square {
    /// Left edge of the square's cell.
    pub x: i32,
    /// Top edge of the square's cell.
    pub y: i32,
    /// Current color.
    pub color: Palette,
    stage: u8,
}

impl Square {
    /// New square at stage 0.
    pub fn new(x: i32, y: i32, color: Palette) -> Self {
        Self {
            x,
            y,
            color,
            stage: 0,
        }
    }

    /// Current growth stage, always within `0..=MAX_STAGE`.
    pub fn stage(&self) -> u8 {
        self.stage
    }

    /// Advance growth by one stage.
    ///
    /// Stages below [`MAX_STAGE`] increment; at [`MAX_STAGE`] the square is drawn at full size
    /// and reports `finished`.
    pub fn grow(&mut self) -> Step {
        let size = GROW_SIZES[usize::from(self.stage)];
        if self.stage < MAX_STAGE {
            self.stage += 1;
            Step {
                size,
                finished: false,
            }
        } else {
            Step {
                size,
                finished: true,
            }
        }
    }

    /// Step the erase animation down by one stage, forcing the erase color.
    ///
    /// Stage 0 is terminal: it clears the full cell and reports `finished`.
    pub fn shrink(&mut self) -> Step {
        self.color = Palette::Erase;
        let size = ERASE_SIZES[usize::from(self.stage)];
        if self.stage > 0 {
            self.stage -= 1;
            Step {
                size,
                finished: false,
            }
        } else {
            Step {
                size,
                finished: true,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/square.rs"]
mod tests;
