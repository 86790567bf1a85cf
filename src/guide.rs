//! # Tessera guide (v0.1.0)
//!
//! A walkthrough of Tessera's model and public API.
//!
//! If you are looking for copy/paste commands, start with the repository `README.md`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Square`](crate::Square): one grid cell that grows through six stages, then shrinks back
//! - [`Pattern`](crate::Pattern): a cluster of squares grown inside one [`DrawRect`](crate::DrawRect)
//! - [`PatternEngine`](crate::PatternEngine): the per-frame controller owning the surface
//! - [`EngineConfig`](crate::EngineConfig): timings, history size, regions and seed
//! - [`RandomSource`](crate::RandomSource): every random decision goes through one
//! - [`Surface`](crate::Surface) / [`Context2d`](crate::Context2d): the drawing target
//!
//! Patterns move through three collections:
//!
//! 1. **active**: still placing and growing squares
//! 2. **complete**: retired and kept on screen, at most `max_patterns` of them
//! 3. **pending deletion**: evicted from history, erased one square at a time, then dropped
//!
//! ---
//!
//! ## One tick
//!
//! [`PatternEngine::tick`](crate::PatternEngine::tick) runs these steps in order:
//!
//! 1. Spawn a pattern if none is active or the spawn timer elapsed.
//! 2. If the square timer elapsed, every active pattern places one square.
//! 3. Every active pattern grows its squares by one stage and draws them.
//! 4. Patterns with no growing squares end by chance ([`PATTERN_END_P`](crate::PATTERN_END_P))
//!    or because placement left their rectangle.
//! 5. Every pattern pending deletion erases one stage of its oldest square.
//! 6. Overflowing history moves its oldest patterns to pending deletion.
//!
//! Timers compare strictly: a square is placed on the first tick *after* its deadline.
//!
//! ---
//!
//! ## Square geometry
//!
//! Squares live on a 10px grid ([`CELL`](crate::CELL)). A square drawn at size `s` covers the
//! bottom-right `s x s` corner of its cell:
//!
//! ```text
//! growth sizes by stage: 1 2 4 6 8 10
//! erase sizes by stage:  10 8 6 4 2 1
//! ```
//!
//! Erasing clears rather than paints, so the surface background shows through.
//! [`draw_square`](crate::draw_square) refuses sizes above 10 and reports
//! [`DrawOutcome::Skipped`](crate::DrawOutcome::Skipped).
//!
//! ---
//!
//! ## Driving frames
//!
//! The engine never schedules itself. A [`FrameDriver`](crate::FrameDriver) yields timestamps
//! and [`PatternEngine::on_frame`](crate::PatternEngine::on_frame) answers with a
//! [`FrameRequest`](crate::FrameRequest). [`FixedStepDriver`](crate::FixedStepDriver) is the
//! headless driver used by the CLI:
//!
//! ```no_run
//! use tessera::{Canvas, EngineConfig, FixedStepDriver, PatternEngine, PixelHost, PixelSurface};
//!
//! # fn main() -> tessera::TesseraResult<()> {
//! let viewport = Canvas::new(320, 180);
//! let mut host = PixelHost::new(viewport);
//! host.insert("canvas", PixelSurface::new(viewport));
//!
//! let config = EngineConfig {
//!     seed: Some(42),
//!     ..EngineConfig::default()
//! };
//! let mut engine = PatternEngine::create(&mut host, "canvas", config)?;
//! engine.start(viewport);
//!
//! let mut driver = FixedStepDriver::new(60.0)?.with_max_frames(600);
//! let stats = engine.run(&mut driver)?;
//! let frame = engine.surface().readback();
//! assert_eq!(stats.frames, 600);
//! assert_eq!(frame.data.len(), 320 * 180 * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## Reproducibility
//!
//! With `seed` set, the same config and the same timestamps paint the same pixels. Tests that
//! need exact control use [`ScriptedRandom`](crate::ScriptedRandom), which replays a fixed list
//! of draws.
//!
//! Random draws happen in a fixed order when placing a square: color first, then either the
//! two grid offsets (fresh placement) or the right-step, down-step and color-inherit coins
//! (placement next to the last completed square).
//!
//! ---
//!
//! ## Errors
//!
//! Construction fails with [`TesseraError`](crate::TesseraError) when the surface id does not
//! resolve, the surface has no 2D context, or the config does not validate. Once running, a
//! drawing failure inside one pattern is counted in
//! [`RunStats::pattern_failures`](crate::RunStats::pattern_failures) and the tick carries on.
