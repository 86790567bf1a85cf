//! Tessera is a procedural "data decode" animation engine.
//!
//! It paints transient patterns of small colored squares onto a 2D surface. Patterns spawn on
//! a timer inside configured regions, grow square by square, retire into a bounded history and
//! are erased square by square once that history overflows.
//!
//! # Frame overview
//!
//! 1. **Spawn**: a new [`Pattern`] when none is active or the spawn timer elapsed
//! 2. **Grow**: place squares on the square timer and advance every growing square one stage
//! 3. **Retire**: idle patterns end by chance or when placement left their region
//! 4. **Erase**: patterns evicted from the history shrink away one square at a time
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Injectable randomness**: every random decision goes through a [`RandomSource`].
//! - **Explicit frame loop**: a [`FrameDriver`] supplies timestamps, a [`FrameScheduler`]
//!   decides when to stop. Nothing reschedules itself.
//!
//! See [`crate::guide`] for a walkthrough.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod foundation;
mod pattern;
mod render;

/// Standalone walkthrough of Tessera's concepts and public API.
pub mod guide;

pub use engine::config::EngineConfig;
pub use engine::pattern_engine::{PATTERN_END_P, PatternEngine, RunStats, Timers};
pub use engine::region::RegionSelector;
pub use engine::scheduler::{FixedStepDriver, FrameDriver, FrameRequest, FrameScheduler};
pub use foundation::core::{Canvas, DrawRect, Millis, Rgba8Premul};
pub use foundation::error::{TesseraError, TesseraResult};
pub use foundation::random::{RandomSource, ScriptedRandom, SeededRandom};
pub use pattern::model::{EraseProgress, Pattern, PatternId, Placement};
pub use pattern::square::{CELL, MAX_STAGE, Palette, Square, Step};
pub use render::pixel::{FrameRGBA, PixelHost, PixelSurface};
pub use render::square::{DrawOutcome, MAX_DRAW_SIZE, draw_square};
pub use render::surface::{Context2d, Surface, SurfaceHost};
