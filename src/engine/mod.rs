//! Run lifecycle controller
//!
//! Owns one simulation state and everything around it: the tick source,
//! input translation, best score, host capabilities and the frame sink.
//! Callbacks fire synchronously from inside `step`.

#[cfg(target_arch = "wasm32")]
pub mod frame_loop;
pub mod ticker;

#[cfg(target_arch = "wasm32")]
pub use frame_loop::AnimationFrameLoop;
pub use ticker::{FrameClock, ManualTicks, TickSource};

use crate::error::RenderError;
use crate::input::{InputAdapter, InputEvent};
use crate::persistence::{BestScore, KeyValueStore, RunSummary};
use crate::platform::{HapticStrength, HostCapabilities, ShareOutcome};
use crate::renderer::{FrameSink, Vertex, build_frame, build_idle_frame};
use crate::settings::Settings;
use crate::sim::{GameState, RandomSource, RunStatus, TickOutcome, TickReport, tick};
use crate::tuning::Tuning;

/// Host notifications
pub struct Callbacks {
    /// `(score, best, level)` after every tick that doesn't end the run
    pub on_score_update: Box<dyn FnMut(u64, u64, u32)>,
    /// Final score, best and whether it's a new best, once per run
    pub on_game_over: Box<dyn FnMut(RunSummary)>,
    pub on_game_start: Box<dyn FnMut()>,
}

impl Default for Callbacks {
    fn default() -> Self {
        Self {
            on_score_update: Box::new(|_, _, _| {}),
            on_game_over: Box::new(|_| {}),
            on_game_start: Box::new(|| {}),
        }
    }
}

/// Everything an engine is built from
pub struct EngineParts {
    /// Play-field size in pixels
    pub width: u32,
    pub height: u32,
    pub tuning: Tuning,
    pub settings: Settings,
    pub sink: Box<dyn FrameSink>,
    pub store: Box<dyn KeyValueStore>,
    pub host: Box<dyn HostCapabilities>,
    pub rng: Box<dyn RandomSource>,
    pub ticker: Box<dyn TickSource>,
    pub callbacks: Callbacks,
}

pub struct Engine {
    state: GameState,
    tuning: Tuning,
    settings: Settings,
    input: InputAdapter,
    best: BestScore,
    sink: Box<dyn FrameSink>,
    host: Box<dyn HostCapabilities>,
    rng: Box<dyn RandomSource>,
    ticker: Box<dyn TickSource>,
    clock: FrameClock,
    callbacks: Callbacks,
    last_run: Option<RunSummary>,
}

impl Engine {
    /// Build an idle engine and draw the idle preview
    pub fn new(parts: EngineParts) -> Self {
        let EngineParts {
            width,
            height,
            tuning,
            settings,
            mut sink,
            store,
            host,
            rng,
            ticker,
            callbacks,
        } = parts;

        sink.resize(width, height);
        let best = BestScore::load(store);

        let mut engine = Self {
            state: GameState::new(width as f32, height as f32, &tuning),
            tuning,
            settings,
            input: InputAdapter::new(),
            best,
            sink,
            host,
            rng,
            ticker,
            clock: FrameClock::new(),
            callbacks,
            last_run: None,
        };
        log::info!(
            "Engine created: {}x{}, best score {}",
            width,
            height,
            engine.best.get()
        );
        engine.render_idle();
        engine
    }

    /// Begin a run. Only valid from `Idle` or `GameOver`; returns false otherwise.
    pub fn start(&mut self) -> bool {
        if self.state.status == RunStatus::Playing {
            log::warn!("start() ignored while {}", self.state.status.as_str());
            return false;
        }

        self.state.begin_run(&self.tuning);
        self.input.reset();
        self.clock.reset();
        self.last_run = None;

        (self.callbacks.on_game_start)();
        self.pulse(HapticStrength::Light);

        self.ticker.start();
        log::info!("Run started");
        true
    }

    /// Force `Idle` and halt tick scheduling. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.ticker.stop();
        self.input.reset();
        if self.state.status != RunStatus::Idle {
            log::info!("Engine stopped ({} -> idle)", self.state.status.as_str());
            self.state.status = RunStatus::Idle;
        }
    }

    /// Leave `GameOver` (or abandon a run) and start a fresh one
    pub fn restart(&mut self) -> bool {
        self.stop();
        self.start()
    }

    /// Device pixels per CSS pixel changed (zoom, moved to another display).
    /// Takes effect on the next `resize`.
    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        self.sink.set_pixel_ratio(pixel_ratio);
    }

    /// Change the play-field bounds without resetting the run
    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.resize(width as f32, height as f32, &self.tuning);
        self.sink.resize(width, height);
        log::debug!("Resized to {}x{}", width, height);

        match self.state.status {
            RunStatus::Idle => self.render_idle(),
            _ => self.render(),
        }
    }

    /// Animation-frame entry point. Returns whether a tick ran.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.ticker.is_running() || !self.state.is_playing() {
            return false;
        }
        let dt = self.clock.delta(now_ms);
        self.step(dt);
        true
    }

    /// Run one simulation tick of `dt` time units, notify, then draw
    pub fn step(&mut self, dt: f32) -> TickReport {
        let report = tick(&mut self.state, &self.tuning, dt, self.rng.as_mut());

        match report.outcome {
            TickOutcome::Skipped => return report,
            TickOutcome::Running => {
                (self.callbacks.on_score_update)(
                    self.state.score,
                    self.best.get(),
                    self.state.level,
                );
            }
            TickOutcome::Collided => self.finish_run(),
        }

        if let Some(level) = report.level_up {
            log::info!("Level {}", level);
            self.pulse(HapticStrength::Medium);
        }

        self.render();
        report
    }

    fn finish_run(&mut self) {
        self.ticker.stop();
        self.input.reset();

        let summary = self.best.record(self.state.score);
        self.last_run = Some(summary);
        self.pulse(HapticStrength::Heavy);

        log::info!(
            "Game over: score {} (best {}{})",
            summary.final_score,
            summary.best,
            if summary.is_new_best { ", new best" } else { "" }
        );
        (self.callbacks.on_game_over)(summary);
    }

    /// Translate a raw input event into an avatar target (only while playing)
    pub fn handle_input(&mut self, event: InputEvent) -> Option<f32> {
        let field_width = self.state.field.x;
        self.input.handle(
            event,
            &mut self.state.avatar,
            field_width,
            self.state.status,
            &self.tuning,
        )
    }

    pub fn best_score(&self) -> u64 {
        self.best.get()
    }

    /// Clear the stored best score
    pub fn reset_best_score(&mut self) {
        self.best.reset();
    }

    pub fn status(&self) -> RunStatus {
        self.state.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Outcome of the most recent finished run, until the next `start`
    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Apply and persist new settings
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.save(self.best.store_mut());
        if self.state.status == RunStatus::Idle {
            self.render_idle();
        }
    }

    /// Share the current (or just-finished) score through the host.
    /// `done` receives the outcome once the host has actually finished.
    pub fn share_score(&mut self, done: impl FnOnce(ShareOutcome) + 'static) {
        let score = self.state.score;
        self.host.share_score(
            score,
            Box::new(move |outcome| {
                if !outcome.success {
                    log::info!("Share of {score} unavailable or declined");
                }
                done(outcome);
            }),
        );
    }

    pub fn add_to_favorites(&mut self) -> bool {
        self.host.add_to_favorites()
    }

    /// Signal host readiness; returns whether we're running inside a mini-app
    pub fn host_ready(&mut self) -> bool {
        self.host.ready()
    }

    pub fn is_mini_app(&self) -> bool {
        self.host.is_mini_app()
    }

    fn pulse(&mut self, strength: HapticStrength) {
        if self.settings.haptics_enabled {
            self.host.haptic(strength);
        }
    }

    /// Draw the current run state
    pub fn render(&mut self) {
        let vertices = build_frame(&self.state, &self.settings);
        self.present(&vertices);
    }

    /// Draw the pre-run preview
    pub fn render_idle(&mut self) {
        let vertices = build_idle_frame(self.state.field, &self.tuning);
        self.present(&vertices);
    }

    fn present(&mut self, vertices: &[Vertex]) {
        if let Err(e) = self.sink.present(vertices) {
            match e {
                RenderError::Lost => {
                    log::warn!("Surface lost; reconfiguring");
                    self.sink.reconfigure();
                }
                e => log::error!("Render error: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BEST_SCORE_KEY;
    use crate::input::Direction;
    use crate::persistence::{MemoryStore, StorageError};
    use crate::platform::{NoHost, ShareDone, ShareMethod};
    use crate::sim::{Obstacle, Orb, ScriptedSource};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Start,
        Score(u64, u64, u32),
        Over(RunSummary),
    }

    /// Store whose contents outlive the engine so tests can inspect them
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<HashMap<String, String>>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.0.borrow().get(key).cloned())
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().remove(key);
            Ok(())
        }
    }

    #[derive(Default)]
    struct SinkLog {
        frames: u32,
        size: (u32, u32),
        pixel_ratio: f32,
        reconfigures: u32,
        /// Fail the next present with `Lost`
        lose_next: bool,
    }

    #[derive(Clone, Default)]
    struct CountingSink(Rc<RefCell<SinkLog>>);

    impl FrameSink for CountingSink {
        fn present(&mut self, _vertices: &[Vertex]) -> Result<(), RenderError> {
            let mut log = self.0.borrow_mut();
            if std::mem::take(&mut log.lose_next) {
                return Err(RenderError::Lost);
            }
            log.frames += 1;
            Ok(())
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.0.borrow_mut().size = (width, height);
        }
        fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
            self.0.borrow_mut().pixel_ratio = pixel_ratio;
        }
        fn reconfigure(&mut self) {
            self.0.borrow_mut().reconfigures += 1;
        }
    }

    /// Host that records haptics and holds share completions until resolved
    #[derive(Clone, Default)]
    struct RecordingHost {
        haptics: Rc<RefCell<Vec<HapticStrength>>>,
        pending_share: Rc<RefCell<Option<ShareDone>>>,
    }

    impl RecordingHost {
        fn resolve_share(&self, outcome: ShareOutcome) {
            let done = self.pending_share.borrow_mut().take();
            if let Some(done) = done {
                done(outcome);
            }
        }
    }

    impl HostCapabilities for RecordingHost {
        fn share_score(&mut self, _score: u64, done: ShareDone) {
            *self.pending_share.borrow_mut() = Some(done);
        }

        fn haptic(&mut self, strength: HapticStrength) -> bool {
            self.haptics.borrow_mut().push(strength);
            true
        }
    }

    struct Harness {
        engine: Engine,
        events: Rc<RefCell<Vec<Event>>>,
        ticks: ManualTicks,
        store: SharedStore,
        sink: CountingSink,
    }

    fn harness_with(store: SharedStore) -> Harness {
        harness_with_host(store, Box::new(NoHost))
    }

    fn harness_with_host(store: SharedStore, host: Box<dyn HostCapabilities>) -> Harness {
        let events = Rc::new(RefCell::new(Vec::new()));
        let ticks = ManualTicks::new();
        let sink = CountingSink::default();

        let (e1, e2, e3) = (events.clone(), events.clone(), events.clone());
        let callbacks = Callbacks {
            on_score_update: Box::new(move |s, b, l| e1.borrow_mut().push(Event::Score(s, b, l))),
            on_game_over: Box::new(move |summary| e2.borrow_mut().push(Event::Over(summary))),
            on_game_start: Box::new(move || e3.borrow_mut().push(Event::Start)),
        };

        let engine = Engine::new(EngineParts {
            width: 400,
            height: 800,
            tuning: Tuning::default(),
            settings: Settings::default(),
            sink: Box::new(sink.clone()),
            store: Box::new(store.clone()),
            host,
            // High rolls: no orbs, obstacles spawn hard against the right wall
            rng: Box::new(ScriptedSource::constant(0.99)),
            ticker: Box::new(ticks.clone()),
            callbacks,
        });

        Harness {
            engine,
            events,
            ticks,
            store,
            sink,
        }
    }

    fn harness() -> Harness {
        harness_with(SharedStore::default())
    }

    fn overlap_avatar(engine: &mut Engine) {
        let avatar = engine.state().avatar.clone();
        engine.state_mut().obstacles.push(Obstacle {
            pos: avatar.pos,
            size: avatar.size,
            speed: 0.0,
        });
    }

    fn game_overs(events: &[Event]) -> Vec<(u64, u64)> {
        summaries(events)
            .iter()
            .map(|s| (s.final_score, s.best))
            .collect()
    }

    fn summaries(events: &[Event]) -> Vec<RunSummary> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Over(summary) => Some(*summary),
                _ => None,
            })
            .collect()
    }

    /// Play one run ending with exactly `score` points
    fn finish_with_score(h: &mut Harness, score: u64) {
        assert!(h.engine.start());
        h.engine.state_mut().score = score;
        overlap_avatar(&mut h.engine);
        h.engine.step(0.0);
        assert_eq!(h.engine.status(), RunStatus::GameOver);
    }

    #[test]
    fn test_new_engine_is_idle_and_draws_preview() {
        let h = harness();
        assert_eq!(h.engine.status(), RunStatus::Idle);
        assert_eq!(h.engine.best_score(), 0);
        assert!(!h.ticks.is_running());
        assert_eq!(h.sink.0.borrow().frames, 1);
        assert_eq!(h.sink.0.borrow().size, (400, 800));
    }

    #[test]
    fn test_start_resets_and_schedules() {
        let mut h = harness();
        assert!(h.engine.start());
        assert_eq!(h.engine.status(), RunStatus::Playing);
        assert!(h.ticks.is_running());
        assert_eq!(h.events.borrow().as_slice(), &[Event::Start]);

        let state = h.engine.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.elapsed_ticks, 0);
        assert!(state.obstacles.is_empty() && state.orbs.is_empty());
        assert_eq!(state.avatar.pos, Vec2::new(180.0, 700.0));
    }

    #[test]
    fn test_start_rejected_while_playing() {
        let mut h = harness();
        assert!(h.engine.start());
        h.engine.step(1.0);
        let ticks = h.engine.state().elapsed_ticks;

        assert!(!h.engine.start());
        assert_eq!(h.engine.state().elapsed_ticks, ticks);
        assert_eq!(h.ticks.starts(), 1);
    }

    #[test]
    fn test_level_two_after_one_interval() {
        let mut h = harness();
        h.engine.start();
        let interval = h.engine.tuning().difficulty_interval;
        for _ in 0..interval {
            h.engine.step(1.0);
        }
        assert_eq!(h.engine.status(), RunStatus::Playing);
        assert_eq!(h.engine.state().level, 2);
        assert!(matches!(h.events.borrow().last(), Some(Event::Score(_, 0, 2))));
    }

    #[test]
    fn test_collision_fires_game_over_with_score() {
        let mut h = harness();
        h.engine.start();
        for _ in 0..120 {
            h.engine.step(1.0);
        }
        let score = h.engine.state().score;
        assert_eq!(score, 2);

        overlap_avatar(&mut h.engine);
        let report = h.engine.step(1.0);

        assert_eq!(report.outcome, TickOutcome::Collided);
        assert_eq!(h.engine.status(), RunStatus::GameOver);
        assert!(!h.ticks.is_running());
        assert!(!h.engine.is_ticking());
        let events = h.events.borrow();
        assert_eq!(game_overs(&events), vec![(score, score)]);
        // The terminal tick reports through game over only
        assert!(matches!(events.last(), Some(Event::Over(_))));
    }

    #[test]
    fn test_game_over_fires_once_per_run() {
        let mut h = harness();
        finish_with_score(&mut h, 10);
        h.engine.step(1.0);
        h.engine.step(1.0);
        assert!(!h.engine.frame(5_000.0));
        assert_eq!(game_overs(&h.events.borrow()).len(), 1);
    }

    #[test]
    fn test_orb_at_center_adds_bonus() {
        let mut h = harness();
        h.engine.start();
        let center = h.engine.state().avatar.center();
        h.engine.state_mut().orbs.push(Orb {
            pos: center,
            radius: 15.0,
            speed: 0.0,
            pulse_phase: 0.0,
        });

        let report = h.engine.step(0.0);
        assert_eq!(report.orbs_collected, 1);
        assert!(h.engine.state().orbs.is_empty());
        assert_eq!(h.engine.state().score, h.engine.tuning().orb_points);
    }

    #[test]
    fn test_best_score_kept_and_beaten() {
        let store = SharedStore::default();
        store.0.borrow_mut().insert(BEST_SCORE_KEY.into(), "100".into());
        let mut h = harness_with(store);
        assert_eq!(h.engine.best_score(), 100);

        finish_with_score(&mut h, 50);
        assert_eq!(h.engine.best_score(), 100);
        assert_eq!(game_overs(&h.events.borrow()).last(), Some(&(50, 100)));
        assert_eq!(h.store.0.borrow().get(BEST_SCORE_KEY).cloned(), Some("100".into()));
        assert_eq!(h.engine.last_run().map(|r| r.is_new_best), Some(false));

        finish_with_score(&mut h, 150);
        assert_eq!(h.engine.best_score(), 150);
        assert_eq!(game_overs(&h.events.borrow()).last(), Some(&(150, 150)));
        assert_eq!(h.store.0.borrow().get(BEST_SCORE_KEY).cloned(), Some("150".into()));
        assert_eq!(h.engine.last_run().map(|r| r.is_new_best), Some(true));
    }

    #[test]
    fn test_reset_best_score() {
        let store = SharedStore::default();
        store.0.borrow_mut().insert(BEST_SCORE_KEY.into(), "321".into());
        let mut h = harness_with(store);

        h.engine.reset_best_score();
        assert_eq!(h.engine.best_score(), 0);
        assert!(!h.store.0.borrow().contains_key(BEST_SCORE_KEY));
    }

    #[test]
    fn test_resize_clamps_avatar_without_resetting() {
        let mut h = harness();
        h.engine.start();
        h.engine.handle_input(InputEvent::Key(Direction::Right));
        for _ in 0..30 {
            h.engine.step(1.0);
        }
        let score = h.engine.state().score;
        h.engine.state_mut().avatar.pos.x = 350.0;

        h.engine.resize(200, 600);
        let state = h.engine.state();
        assert_eq!(state.status, RunStatus::Playing);
        assert_eq!(state.score, score);
        assert_eq!(state.avatar.pos.x, 160.0);
        assert_eq!(state.avatar.target_x, 160.0);
        assert_eq!(state.avatar.pos.y, 500.0);
        assert_eq!(h.sink.0.borrow().size, (200, 600));
    }

    #[test]
    fn test_stop_is_idempotent_and_halts_ticks() {
        let mut h = harness();
        h.engine.start();
        assert!(h.engine.frame(0.0));

        h.engine.stop();
        h.engine.stop();
        assert_eq!(h.engine.status(), RunStatus::Idle);
        assert!(!h.ticks.is_running());

        let ticks = h.engine.state().elapsed_ticks;
        let frames = h.sink.0.borrow().frames;
        assert!(!h.engine.frame(16.67));
        assert_eq!(h.engine.state().elapsed_ticks, ticks);
        assert_eq!(h.sink.0.borrow().frames, frames);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut h = harness();
        finish_with_score(&mut h, 7);
        assert!(h.engine.restart());
        assert_eq!(h.engine.status(), RunStatus::Playing);
        assert_eq!(h.engine.state().score, 0);
        assert!(h.engine.last_run().is_none());
        assert_eq!(h.ticks.starts(), 2);
    }

    #[test]
    fn test_input_ignored_unless_playing() {
        let mut h = harness();
        assert_eq!(h.engine.handle_input(InputEvent::Key(Direction::Left)), None);
        h.engine.start();
        assert_eq!(h.engine.handle_input(InputEvent::Key(Direction::Left)), Some(116.0));
    }

    #[test]
    fn test_frame_uses_wall_clock() {
        let mut h = harness();
        h.engine.start();
        h.engine.frame(1000.0);
        h.engine.frame(1000.0 + crate::consts::FRAME_MS * 2.0);
        assert_eq!(h.engine.state().elapsed_ticks, 2);
        // One nominal unit, then two
        let carry = h.engine.state().score_carry;
        assert!((carry - 0.017 * 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_settings_persist_haptics() {
        let mut h = harness();
        h.engine.set_settings(Settings {
            haptics_enabled: false,
            ..Default::default()
        });
        assert!(!h.engine.settings().haptics_enabled);
        let reloaded = Settings::load(&h.store, false);
        assert!(!reloaded.haptics_enabled);
    }

    #[test]
    fn test_host_capabilities_unavailable() {
        let mut h = harness();
        let shared = Rc::new(RefCell::new(None));
        let out = shared.clone();
        h.engine.share_score(move |outcome| *out.borrow_mut() = Some(outcome));
        assert_eq!(*shared.borrow(), Some(ShareOutcome::failed()));
        assert!(!h.engine.add_to_favorites());
        assert!(!h.engine.host_ready());
        assert!(!h.engine.is_mini_app());
    }

    #[test]
    fn test_share_reports_only_after_host_finishes() {
        let host = RecordingHost::default();
        let mut h = harness_with_host(SharedStore::default(), Box::new(host.clone()));
        let outcome = Rc::new(RefCell::new(None));
        let out = outcome.clone();

        h.engine.share_score(move |o| *out.borrow_mut() = Some(o));
        assert_eq!(*outcome.borrow(), None);

        // Clipboard write rejected
        host.resolve_share(ShareOutcome::failed());
        assert_eq!(*outcome.borrow(), Some(ShareOutcome::failed()));

        let out = outcome.clone();
        h.engine.share_score(move |o| *out.borrow_mut() = Some(o));
        let copied = ShareOutcome {
            success: true,
            method: ShareMethod::Clipboard,
        };
        host.resolve_share(copied);
        assert_eq!(*outcome.borrow(), Some(copied));
    }

    #[test]
    fn test_tie_is_not_a_new_best() {
        let store = SharedStore::default();
        store.0.borrow_mut().insert(BEST_SCORE_KEY.into(), "100".into());
        let mut h = harness_with(store);

        finish_with_score(&mut h, 100);
        let last = summaries(&h.events.borrow()).last().copied();
        assert_eq!(
            last,
            Some(RunSummary {
                final_score: 100,
                best: 100,
                is_new_best: false,
            })
        );

        finish_with_score(&mut h, 101);
        let last = summaries(&h.events.borrow()).last().copied();
        assert_eq!(last.map(|s| s.is_new_best), Some(true));
    }

    #[test]
    fn test_haptic_pulses_follow_run() {
        let host = RecordingHost::default();
        let mut h = harness_with_host(SharedStore::default(), Box::new(host.clone()));
        h.engine.start();
        let interval = h.engine.tuning().difficulty_interval;
        for _ in 0..interval {
            h.engine.step(1.0);
        }
        overlap_avatar(&mut h.engine);
        h.engine.step(1.0);
        assert_eq!(
            host.haptics.borrow().as_slice(),
            &[HapticStrength::Light, HapticStrength::Medium, HapticStrength::Heavy]
        );

        host.haptics.borrow_mut().clear();
        h.engine.set_settings(Settings {
            haptics_enabled: false,
            ..Default::default()
        });
        finish_with_score(&mut h, 1);
        assert!(host.haptics.borrow().is_empty());
    }

    #[test]
    fn test_lost_surface_is_reconfigured() {
        let mut h = harness();
        h.engine.start();
        h.sink.0.borrow_mut().lose_next = true;
        h.engine.step(1.0);
        assert_eq!(h.sink.0.borrow().reconfigures, 1);

        let frames = h.sink.0.borrow().frames;
        h.engine.step(1.0);
        assert_eq!(h.sink.0.borrow().frames, frames + 1);
        assert_eq!(h.sink.0.borrow().reconfigures, 1);
    }

    #[test]
    fn test_pixel_ratio_reaches_sink() {
        let mut h = harness();
        h.engine.set_pixel_ratio(2.0);
        h.engine.resize(300, 500);
        assert_eq!(h.sink.0.borrow().pixel_ratio, 2.0);
        assert_eq!(h.sink.0.borrow().size, (300, 500));
    }

    #[test]
    fn test_memory_store_engine() {
        let engine = Engine::new(EngineParts {
            width: 320,
            height: 480,
            tuning: Tuning::default(),
            settings: Settings::default(),
            sink: Box::new(crate::renderer::NullSink::default()),
            store: Box::new(MemoryStore::with(BEST_SCORE_KEY, "42abc")),
            host: Box::new(NoHost),
            rng: Box::new(ScriptedSource::constant(0.5)),
            ticker: Box::new(ManualTicks::new()),
            callbacks: Callbacks::default(),
        });
        assert_eq!(engine.best_score(), 42);
    }
}
