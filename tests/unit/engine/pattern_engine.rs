use super::*;
use crate::{
    engine::scheduler::FixedStepDriver,
    foundation::core::Rgba8Premul,
    foundation::random::ScriptedRandom,
    pattern::square::{MAX_STAGE, Palette},
    render::pixel::{PixelHost, PixelSurface},
};

fn canvas() -> Canvas {
    Canvas::new(120, 80)
}

fn engine_with(config: EngineConfig, rng: impl RandomSource + 'static) -> PatternEngine<PixelSurface> {
    PatternEngine::bind(PixelSurface::new(canvas()), config, Box::new(rng)).unwrap()
}

fn assert_invariants(engine: &PatternEngine<impl Surface>) {
    let cfg = engine.config();
    assert!(engine.complete_patterns().len() <= cfg.max_patterns);
    for p in engine
        .active_patterns()
        .iter()
        .chain(engine.complete_patterns())
        .chain(engine.patterns_for_deletion())
    {
        for sq in p.active_squares().iter().chain(p.complete_squares()) {
            assert!(sq.stage() <= MAX_STAGE);
        }
    }
    for p in engine
        .complete_patterns()
        .iter()
        .chain(engine.patterns_for_deletion())
    {
        assert!(p.active_squares().is_empty());
    }
}

/// Fails every fill; clears succeed.
struct FlakySurface {
    size: Canvas,
    fills: u64,
}

impl Context2d for FlakySurface {
    fn fill_rect(
        &mut self,
        _x: i32,
        _y: i32,
        _w: u32,
        _h: u32,
        _color: Rgba8Premul,
    ) -> TesseraResult<()> {
        self.fills += 1;
        Err(TesseraError::render("fill failed"))
    }

    fn clear_rect(&mut self, _x: i32, _y: i32, _w: u32, _h: u32) -> TesseraResult<()> {
        Ok(())
    }
}

impl Surface for FlakySurface {
    fn size(&self) -> Canvas {
        self.size
    }

    fn set_size(&mut self, size: Canvas) {
        self.size = size;
    }

    fn context_2d(&mut self) -> Option<&mut dyn Context2d> {
        Some(self as &mut dyn Context2d)
    }
}

#[test]
fn create_fails_for_unknown_surface() {
    let mut host = PixelHost::new(canvas());
    let err = PatternEngine::create(&mut host, "missing", EngineConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, TesseraError::Surface(_)));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn create_fails_without_2d_context() {
    let mut host = PixelHost::new(canvas());
    host.insert("bg", PixelSurface::detached(canvas()));
    let err = PatternEngine::create(&mut host, "bg", EngineConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, TesseraError::Surface(_)));
    assert!(err.to_string().contains("2D"));
}

#[test]
fn create_rejects_invalid_config() {
    let mut host = PixelHost::new(canvas());
    host.insert("bg", PixelSurface::new(canvas()));
    let config = EngineConfig {
        time_between_patterns: -5.0,
        ..EngineConfig::default()
    };
    let err = PatternEngine::create(&mut host, "bg", config).err().unwrap();
    assert!(matches!(err, TesseraError::Config(_)));
}

#[test]
fn start_fits_surface_to_viewport() {
    let mut host = PixelHost::new(Canvas::new(300, 200));
    host.insert("bg", PixelSurface::new(Canvas::new(1, 1)));
    let mut engine = PatternEngine::create(&mut host, "bg", EngineConfig::default()).unwrap();
    assert!(!engine.scheduler().is_running());
    engine.start(host.viewport());
    assert_eq!(engine.surface().size(), Canvas::new(300, 200));
    assert!(engine.scheduler().is_running());
}

#[test]
fn first_tick_spawns_and_starts_growing_a_square() {
    let config = EngineConfig {
        draw_rects: vec![DrawRect::new(0, 0, 50, 50)],
        ..EngineConfig::default()
    };
    let mut engine = engine_with(config, ScriptedRandom::constant(0.5));
    engine.tick(Millis(1.0)).unwrap();

    assert_eq!(engine.active_patterns().len(), 1);
    let pattern = &engine.active_patterns()[0];
    assert_eq!(pattern.id(), PatternId(0));
    let sq = &pattern.active_squares()[0];
    assert_eq!((sq.x, sq.y), (30, 30));
    assert_eq!(sq.color, Palette::Magenta);
    assert_eq!(sq.stage(), 1);

    // Size 1 sits in the far corner of the cell.
    assert_eq!(engine.surface().pixel(39, 39), Some(Palette::Magenta.rgba()));
    assert_eq!(engine.surface().painted_pixels(), 1);

    let timers = engine.timers();
    assert_eq!(timers.next_square_time, Millis(201.0));
    assert_eq!(timers.next_pattern_time, Millis(601.0));
    assert_eq!(engine.last_region_index(), Some(0));
}

#[test]
fn empty_region_list_uses_whole_surface() {
    let mut engine = engine_with(EngineConfig::default(), ScriptedRandom::constant(0.99));
    engine.tick(Millis(1.0)).unwrap();
    let pattern = &engine.active_patterns()[0];
    assert_eq!(pattern.rect(), DrawRect::full(canvas()));
    let sq = &pattern.active_squares()[0];
    assert_eq!((sq.x, sq.y), (120, 80));
    assert_eq!(engine.last_region_index(), None);
}

#[test]
fn no_spawn_while_active_and_timer_pending() {
    let mut engine = engine_with(EngineConfig::default(), ScriptedRandom::constant(0.5));
    engine.tick(Millis(1.0)).unwrap();
    engine.tick(Millis(300.0)).unwrap();
    engine.tick(Millis(601.0)).unwrap();
    assert_eq!(engine.stats().patterns_spawned, 1);
    engine.tick(Millis(601.5)).unwrap();
    assert_eq!(engine.stats().patterns_spawned, 2);
}

#[test]
fn overflowing_history_queues_oldest_for_erasing() {
    let config = EngineConfig {
        max_patterns: 1,
        time_between_squares: 10.0,
        time_between_patterns: 1e9,
        draw_rects: vec![DrawRect::new(0, 0, 0, 0)],
        ..EngineConfig::default()
    };
    let mut engine = engine_with(config, ScriptedRandom::constant(0.5));

    let mut t = 0.0;
    while engine.stats().patterns_retired < 2 {
        t += 1.0;
        assert!(t < 200.0, "second pattern never completed");
        engine.tick(Millis(t)).unwrap();
        assert_invariants(&engine);
    }

    assert_eq!(engine.complete_patterns().len(), 1);
    assert_eq!(engine.complete_patterns()[0].id(), PatternId(1));
    assert_eq!(engine.patterns_for_deletion().len(), 1);
    assert_eq!(engine.patterns_for_deletion()[0].id(), PatternId(0));

    engine.tick(Millis(t + 1.0)).unwrap();
    let evicting = &engine.patterns_for_deletion()[0];
    assert_eq!(evicting.complete_squares()[0].color, Palette::Erase);
    assert_eq!(evicting.complete_squares()[0].stage(), MAX_STAGE - 1);
    assert_eq!(engine.complete_patterns()[0].id(), PatternId(1));
}

#[test]
fn erased_pattern_is_dropped_once_empty() {
    let config = EngineConfig {
        max_patterns: 0,
        time_between_squares: 10.0,
        time_between_patterns: 1e9,
        draw_rects: vec![DrawRect::new(0, 0, 0, 0)],
        ..EngineConfig::default()
    };
    let mut engine = engine_with(config, ScriptedRandom::constant(0.5));

    let mut t = 0.0;
    while engine.stats().patterns_discarded == 0 {
        t += 1.0;
        assert!(t < 200.0, "pattern never discarded");
        engine.tick(Millis(t)).unwrap();
        assert_invariants(&engine);
    }
    assert!(engine.complete_patterns().is_empty());
    // The single square was filled and then fully cleared.
    assert_eq!(engine.surface().pixel(5, 5), Some(Rgba8Premul::transparent()));
}

#[test]
fn two_regions_alternate_across_spawns() {
    let config = EngineConfig {
        time_between_patterns: 0.0,
        draw_rects: vec![DrawRect::new(0, 0, 40, 40), DrawRect::new(60, 0, 40, 40)],
        ..EngineConfig::default()
    };
    let mut engine = engine_with(config, SeededRandom::from_seed(3));
    let mut prev = None;
    for t in 1..=50 {
        engine.tick(Millis(f64::from(t))).unwrap();
        let idx = engine.last_region_index();
        assert_ne!(idx, prev);
        prev = idx;
    }
    assert_eq!(engine.stats().patterns_spawned, 50);
}

#[test]
fn long_run_keeps_invariants() {
    let config = EngineConfig {
        max_patterns: 3,
        ..EngineConfig::default()
    };
    let mut engine = engine_with(config, SeededRandom::from_seed(2024));
    engine.start(canvas());
    let mut driver = FixedStepDriver::new(60.0).unwrap();
    for _ in 0..3000 {
        let now = driver.next_timestamp().unwrap();
        engine.on_frame(now).unwrap();
        assert_invariants(&engine);
    }
    let stats = engine.stats();
    assert_eq!(stats.frames, 3000);
    assert!(stats.patterns_retired > 3);
    assert!(stats.patterns_evicted > 0);
    assert_eq!(stats.pattern_failures, 0);
}

#[test]
fn frame_limit_stops_the_loop() {
    let config = EngineConfig {
        limit_frames: 5,
        ..EngineConfig::default()
    };
    let mut engine = engine_with(config, SeededRandom::from_seed(1));
    let mut driver = FixedStepDriver::new(60.0).unwrap();

    let idle = engine.run(&mut driver).unwrap();
    assert_eq!(idle.frames, 0);

    engine.start(canvas());
    let stats = engine.run(&mut driver).unwrap();
    assert_eq!(stats.frames, 5);
    assert!(!engine.scheduler().is_running());
    assert_eq!(engine.on_frame(Millis(1e6)).unwrap(), FrameRequest::Stop);
    assert_eq!(engine.stats().frames, 5);
}

#[test]
fn drawing_failures_are_skipped_per_pattern() {
    let surface = FlakySurface {
        size: canvas(),
        fills: 0,
    };
    let config = EngineConfig {
        time_between_patterns: 0.0,
        time_between_squares: 0.0,
        debug_mode: true,
        ..EngineConfig::default()
    };
    let mut engine =
        PatternEngine::bind(surface, config, Box::new(SeededRandom::from_seed(9))).unwrap();
    for t in 1..=20 {
        engine.tick(Millis(f64::from(t))).unwrap();
        assert_invariants(&engine);
    }
    assert_eq!(engine.stats().frames, 20);
    assert!(engine.stats().pattern_failures > 0);
    assert_eq!(engine.surface().fills, engine.stats().pattern_failures);
}
