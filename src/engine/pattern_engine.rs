use crate::{
    engine::config::EngineConfig,
    engine::region::RegionSelector,
    engine::scheduler::{FrameDriver, FrameRequest, FrameScheduler},
    foundation::core::{Canvas, DrawRect, Millis},
    foundation::error::{TesseraError, TesseraResult},
    foundation::random::{RandomSource, SeededRandom},
    pattern::model::{EraseProgress, Pattern, PatternId},
    render::surface::{Context2d, Surface, SurfaceHost},
};

/// Chance per tick that an idle pattern (no growing squares) ends.
pub const PATTERN_END_P: f64 = 0.028;

/// Absolute deadlines for the next spawn and the next square placement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Timers {
    /// Squares are placed on the first tick strictly after this time.
    pub next_square_time: Millis,
    /// A pattern is spawned on the first tick strictly after this time.
    pub next_pattern_time: Millis,
}

/// Counters accumulated across ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Ticks executed.
    pub frames: u64,
    /// Patterns created.
    pub patterns_spawned: u64,
    /// Patterns moved from active to complete.
    pub patterns_retired: u64,
    /// Patterns moved from complete to pending deletion.
    pub patterns_evicted: u64,
    /// Patterns dropped after being fully erased.
    pub patterns_discarded: u64,
    /// Per-pattern drawing failures that were caught and skipped.
    pub pattern_failures: u64,
}

/// Pattern bookkeeping, kept apart from the surface so a tick can hold the drawing context
/// while mutating it.
struct Patterns {
    config: EngineConfig,
    regions: RegionSelector,
    rng: Box<dyn RandomSource>,
    active: Vec<Pattern>,
    complete: Vec<Pattern>,
    pending_deletion: Vec<Pattern>,
    timers: Timers,
    next_id: u64,
    stats: RunStats,
}

/// Frame-driven controller that spawns, grows, retires and erases patterns on one surface.
///
/// Each [`PatternEngine::tick`] runs the whole update to completion; the engine is borrowed
/// mutably for the duration, so ticks never overlap.
pub struct PatternEngine<S: Surface> {
    surface: S,
    scheduler: FrameScheduler,
    patterns: Patterns,
}

impl<S: Surface> PatternEngine<S> {
    /// Resolve `surface_id` on `host` and bind an engine to it.
    ///
    /// Randomness is seeded from `config.seed`, or from the OS when unset.
    #[tracing::instrument(skip(host, config))]
    pub fn create<H>(host: &mut H, surface_id: &str, config: EngineConfig) -> TesseraResult<Self>
    where
        H: SurfaceHost<Surface = S>,
    {
        let rng = SeededRandom::from_optional_seed(config.seed);
        Self::with_random(host, surface_id, config, Box::new(rng))
    }

    /// Like [`PatternEngine::create`], drawing randomness from `rng`.
    pub fn with_random<H>(
        host: &mut H,
        surface_id: &str,
        config: EngineConfig,
        rng: Box<dyn RandomSource>,
    ) -> TesseraResult<Self>
    where
        H: SurfaceHost<Surface = S>,
    {
        let surface = host
            .resolve(surface_id)
            .ok_or_else(|| TesseraError::surface(format!("no surface named '{surface_id}'")))?;
        Self::bind(surface, config, rng).map_err(|e| match e {
            TesseraError::Surface(msg) => TesseraError::surface(format!("'{surface_id}': {msg}")),
            other => other,
        })
    }

    /// Bind an engine to an already resolved surface.
    pub fn bind(
        mut surface: S,
        config: EngineConfig,
        rng: Box<dyn RandomSource>,
    ) -> TesseraResult<Self> {
        config.validate()?;
        if surface.context_2d().is_none() {
            return Err(TesseraError::surface("surface does not support 2D drawing"));
        }

        Ok(Self {
            surface,
            scheduler: FrameScheduler::new(config.limit_frames),
            patterns: Patterns {
                regions: RegionSelector::new(config.draw_rects.clone()),
                config,
                rng,
                active: Vec::new(),
                complete: Vec::new(),
                pending_deletion: Vec::new(),
                timers: Timers::default(),
                next_id: 0,
                stats: RunStats::default(),
            },
        })
    }

    /// Fit the surface to `viewport`. Repeating the same size is a no-op.
    pub fn resize(&mut self, viewport: Canvas) {
        self.surface.set_size(viewport);
    }

    /// Fit the surface to `viewport` and begin requesting frames.
    pub fn start(&mut self, viewport: Canvas) {
        self.resize(viewport);
        self.scheduler.start();
        if self.patterns.config.debug_mode {
            tracing::debug!(
                width = viewport.width,
                height = viewport.height,
                limit_frames = self.scheduler.limit(),
                "engine started"
            );
        }
    }

    /// Stop requesting frames. The current state stays on the surface.
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Frame callback: tick at `now` if running and report whether another frame is wanted.
    pub fn on_frame(&mut self, now: Millis) -> TesseraResult<FrameRequest> {
        if !self.scheduler.is_running() {
            return Ok(FrameRequest::Stop);
        }
        if let Err(e) = self.tick(now) {
            self.scheduler.stop();
            return Err(e);
        }
        Ok(self.scheduler.record_tick())
    }

    /// Pull timestamps from `driver` until the scheduler stops or the driver runs dry.
    ///
    /// Call [`PatternEngine::start`] first; an idle engine returns immediately.
    pub fn run<D: FrameDriver + ?Sized>(&mut self, driver: &mut D) -> TesseraResult<RunStats> {
        while self.scheduler.is_running() {
            let Some(now) = driver.next_timestamp() else {
                break;
            };
            if self.on_frame(now)? == FrameRequest::Stop {
                break;
            }
        }
        Ok(self.patterns.stats)
    }

    /// Run one full update at `now`, regardless of the scheduler state.
    ///
    /// Only a surface that has lost its 2D context fails the tick; drawing errors inside a
    /// pattern are counted and skipped.
    pub fn tick(&mut self, now: Millis) -> TesseraResult<()> {
        let full = DrawRect::full(self.surface.size());
        let ctx = self
            .surface
            .context_2d()
            .ok_or_else(|| TesseraError::surface("surface lost its 2D context"))?;
        self.patterns.tick(now, full, ctx);
        Ok(())
    }

    /// The bound surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Give the surface back, consuming the engine.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.patterns.config
    }

    /// Frame loop state.
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Patterns still growing, in spawn order.
    pub fn active_patterns(&self) -> &[Pattern] {
        &self.patterns.active
    }

    /// Finished patterns still on screen, oldest first.
    pub fn complete_patterns(&self) -> &[Pattern] {
        &self.patterns.complete
    }

    /// Patterns being erased, oldest first.
    pub fn patterns_for_deletion(&self) -> &[Pattern] {
        &self.patterns.pending_deletion
    }

    /// Spawn and square deadlines.
    pub fn timers(&self) -> Timers {
        self.patterns.timers
    }

    /// Configured region picked by the most recent spawn. `None` while no region has been
    /// picked, which includes running without configured regions.
    pub fn last_region_index(&self) -> Option<usize> {
        self.patterns.regions.last_index()
    }

    /// Counters so far.
    pub fn stats(&self) -> RunStats {
        self.patterns.stats
    }
}

impl Patterns {
    fn tick(&mut self, now: Millis, full: DrawRect, ctx: &mut dyn Context2d) {
        self.stats.frames += 1;
        if self.config.debug_mode {
            tracing::trace!(frame = self.stats.frames, now = now.0, "tick");
        }

        self.maybe_spawn(now, full);

        let square_due = now.is_after(self.timers.next_square_time);
        self.advance_active(square_due, ctx);
        self.advance_eviction(ctx);
        if square_due {
            self.timers.next_square_time = now.after(self.config.time_between_squares);
        }

        self.enforce_capacity();
    }

    fn maybe_spawn(&mut self, now: Millis, full: DrawRect) {
        if !self.active.is_empty() && !now.is_after(self.timers.next_pattern_time) {
            return;
        }

        let picked = self.regions.select(self.rng.as_mut());
        let index = picked.map(|(i, _)| i);
        let rect = picked.map_or(full, |(_, r)| r);
        let id = PatternId(self.next_id);
        self.next_id += 1;

        self.active.push(Pattern::new(rect).with_id(id));
        self.timers.next_pattern_time = now.after(self.config.time_between_patterns);
        self.stats.patterns_spawned += 1;

        if self.config.debug_mode {
            tracing::debug!(pattern = id.0, region = ?index, ?rect, "new pattern");
        }
    }

    /// Place, grow and retire active patterns.
    fn advance_active(&mut self, square_due: bool, ctx: &mut dyn Context2d) {
        let debug = self.config.debug_mode;
        let mut retired = Vec::new();

        for (i, pattern) in self.active.iter_mut().enumerate() {
            if square_due {
                pattern.add_square(self.rng.as_mut());
            }

            if let Err(e) = pattern.grow(ctx) {
                self.stats.pattern_failures += 1;
                if debug {
                    tracing::warn!(pattern = pattern.id().0, error = %e, "skipped pattern update");
                }
            }

            if pattern.active_squares().is_empty()
                && (self.rng.chance(PATTERN_END_P) || pattern.is_out_of_bounds())
            {
                retired.push(i);
            }
        }

        // Descending removal keeps the remaining indices valid; the batch is then appended
        // in spawn order.
        let mut moved = Vec::with_capacity(retired.len());
        for &i in retired.iter().rev() {
            moved.push(self.active.remove(i));
        }
        moved.reverse();

        for pattern in &moved {
            if debug {
                tracing::debug!(
                    pattern = pattern.id().0,
                    squares = pattern.complete_squares().len(),
                    out_of_bounds = pattern.is_out_of_bounds(),
                    "pattern complete"
                );
            }
        }
        self.stats.patterns_retired += moved.len() as u64;
        self.complete.extend(moved);
    }

    /// Erase one step of every pattern pending deletion; drop the ones already empty.
    fn advance_eviction(&mut self, ctx: &mut dyn Context2d) {
        let debug = self.config.debug_mode;
        let mut discarded = Vec::new();

        for (k, pattern) in self.pending_deletion.iter_mut().enumerate() {
            if pattern.complete_squares().is_empty() {
                discarded.push(k);
                continue;
            }
            match pattern.erase_step(ctx) {
                Ok(EraseProgress::Stepped | EraseProgress::Removed) => {}
                Ok(EraseProgress::Empty) => {
                    if debug {
                        tracing::debug!(pattern = pattern.id().0, "nothing left to erase");
                    }
                }
                Err(e) => {
                    self.stats.pattern_failures += 1;
                    if debug {
                        tracing::warn!(pattern = pattern.id().0, error = %e, "skipped erase step");
                    }
                }
            }
        }

        for &k in discarded.iter().rev() {
            let pattern = self.pending_deletion.remove(k);
            self.stats.patterns_discarded += 1;
            if debug {
                tracing::debug!(pattern = pattern.id().0, "pattern discarded");
            }
        }
    }

    /// Move the oldest complete patterns into the deletion queue until within capacity.
    fn enforce_capacity(&mut self) {
        let max = self.config.max_patterns;
        if self.complete.len() <= max {
            return;
        }
        let overflow = self.complete.len() - max;
        for pattern in self.complete.drain(..overflow) {
            if self.config.debug_mode {
                tracing::debug!(pattern = pattern.id().0, "pattern queued for erasing");
            }
            self.pending_deletion.push(pattern);
        }
        self.stats.patterns_evicted += overflow as u64;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/pattern_engine.rs"]
mod tests;
