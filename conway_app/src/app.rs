// app.rs - Window state and the controls that drive the engine

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use conway::{GridEngine, GridSnapshot, SharedEngine, Ticker, TickerExit, TickerOptions, PATTERNS};
use egui::Color32;
use log::{info, warn};
use tokio::runtime::Runtime;

pub struct LifeApp {
    engine: SharedEngine,
    ticker: Option<Ticker>,
    runtime: Runtime,
    ctx: egui::Context,

    /// Last board handed out by the engine, for rendering.
    latest: Arc<Mutex<GridSnapshot>>,
    /// Written by the engine's generation observer.
    generation: Arc<AtomicU64>,

    pub options: TickerOptions,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub status: Option<String>,
}

impl LifeApp {
    pub fn new(ctx: egui::Context, mut engine: GridEngine, runtime: Runtime, options: TickerOptions) -> Self {
        let generation = Arc::new(AtomicU64::new(engine.generation()));
        let counter = Arc::clone(&generation);
        engine.subscribe(move |snapshot: &GridSnapshot| {
            counter.store(snapshot.generation, Ordering::Relaxed);
        });

        let latest = Arc::new(Mutex::new(engine.current_state()));
        Self {
            engine: Arc::new(Mutex::new(engine)),
            ticker: None,
            runtime,
            ctx,
            latest,
            generation,
            options,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            status: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_running)
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> GridSnapshot {
        lock(&self.latest).clone()
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        // A ticker that halted on a cycle is still parked here.
        self.pause();
        self.status = None;

        let latest = Arc::clone(&self.latest);
        let ctx = self.ctx.clone();
        let sink = move |snapshot: GridSnapshot| {
            *lock(&latest) = snapshot;
            ctx.request_repaint();
        };
        self.ticker = Some(Ticker::start_on(
            self.runtime.handle(),
            Arc::clone(&self.engine),
            self.options,
            sink,
        ));
    }

    /// Reaps a ticker that ended by itself so its exit reason reaches `status`.
    pub fn collect_finished_ticker(&mut self) {
        if self.ticker.as_ref().is_some_and(|ticker| !ticker.is_running()) {
            self.pause();
        }
    }

    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn pause(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            if let TickerExit::CycleDetected { generation } = self.runtime.block_on(ticker.stop()) {
                self.status = Some(format!("Stable since generation {generation}"));
            }
        }
    }

    pub fn toggle_running(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn step_once(&mut self) {
        self.pause();
        let snapshot = lock(&self.engine).step();
        self.publish(snapshot);
    }

    pub fn clear(&mut self) {
        self.pause();
        let snapshot = lock(&self.engine).clear();
        self.publish(snapshot);
        self.status = None;
    }

    pub fn randomize(&mut self) {
        self.pause();
        let snapshot = {
            let mut engine = lock(&self.engine);
            engine.clear();
            engine.reset()
        };
        info!("random board with {} live cells", snapshot.live_count());
        self.publish(snapshot);
        self.status = None;
    }

    pub fn apply_selected_pattern(&mut self) {
        let Some(pattern) = PATTERNS.get(self.selected_pattern) else {
            return;
        };
        self.pause();
        let result = lock(&self.engine).apply_pattern(pattern);
        match result {
            Ok(snapshot) => {
                self.publish(snapshot);
                self.status = None;
            }
            Err(err) => {
                warn!("{err}");
                self.status = Some(err.to_string());
            }
        }
    }

    /// Flips a cell while paused.
    pub fn toggle_cell(&mut self, x: usize, y: usize) {
        if self.is_running() {
            return;
        }
        let snapshot = {
            let mut engine = lock(&self.engine);
            engine.toggle_cell(x, y).map(|_| engine.current_state())
        };
        if let Some(snapshot) = snapshot {
            self.publish(snapshot);
        }
    }

    /// Changes the stepping rate used by the next ticker. See [`LifeApp::apply_speed`].
    pub fn set_speed(&mut self, generations_per_sec: f32) {
        let millis = (1000.0 / generations_per_sec.max(0.01)).max(1.0) as u64;
        self.options.interval = Duration::from_millis(millis);
    }

    /// Restarts a running ticker whose rate differs from the selected one.
    pub fn apply_speed(&mut self) {
        let stale = self.ticker.as_ref().is_some_and(|ticker| {
            ticker.is_running() && ticker.options().interval != self.options.interval
        });
        if stale {
            self.pause();
            self.start();
        }
    }

    pub fn speed(&self) -> f32 {
        1000.0 / self.options.interval.as_millis().max(1) as f32
    }

    fn publish(&self, snapshot: GridSnapshot) {
        *lock(&self.latest) = snapshot;
    }
}

impl Drop for LifeApp {
    fn drop(&mut self) {
        self.pause();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(width: usize, height: usize) -> LifeApp {
        LifeApp::new(
            egui::Context::default(),
            GridEngine::with_rng_seed(width, height, 1).unwrap(),
            Runtime::new().unwrap(),
            TickerOptions {
                interval: Duration::from_millis(10),
                stop_on_cycle: true,
            },
        )
    }

    fn select(app: &mut LifeApp, name: &str) {
        app.selected_pattern = PATTERNS.iter().position(|p| p.name == name).unwrap();
    }

    #[test]
    fn manual_edits_and_steps_reach_the_view() {
        let mut app = app(5, 5);
        for y in 1..=3 {
            app.toggle_cell(2, y);
        }
        assert_eq!(app.snapshot().live_count(), 3);

        app.step_once();
        assert_eq!(app.snapshot().live_cells(), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(app.generation(), 1);

        app.clear();
        assert_eq!(app.snapshot().live_count(), 0);
        assert_eq!(app.generation(), 0);
    }

    #[test]
    fn random_board_starts_at_generation_zero() {
        let mut app = app(20, 20);
        app.step_once();
        app.randomize();
        assert_eq!(app.generation(), 0);
        assert!(app.snapshot().live_count() > 0);
    }

    #[test]
    fn oversized_pattern_reports_status() {
        let mut app = app(10, 10);
        select(&mut app, "Gosper Glider Gun");
        app.apply_selected_pattern();
        assert!(app.status.as_deref().is_some_and(|s| s.contains("Gosper Glider Gun")));
        assert_eq!(app.snapshot().live_count(), 0);
    }

    #[test]
    fn ticker_halts_on_oscillator() {
        let mut app = app(5, 5);
        select(&mut app, "Blinker");
        app.apply_selected_pattern();

        app.start();
        std::thread::sleep(Duration::from_millis(500));
        assert!(!app.is_running());
        assert!(app.has_ticker());
        assert_eq!(app.generation(), 2);

        app.collect_finished_ticker();
        assert!(!app.has_ticker());
        assert_eq!(app.status.as_deref(), Some("Stable since generation 2"));

        app.pause();
        assert_eq!(app.status.as_deref(), Some("Stable since generation 2"));
    }

    #[test]
    fn speed_maps_to_interval() {
        let mut app = app(3, 3);
        app.set_speed(10.0);
        assert_eq!(app.options.interval, Duration::from_millis(100));
        assert_eq!(app.speed(), 10.0);
    }

    #[test]
    fn speed_changes_restart_only_when_applied() {
        let mut app = app(5, 5);
        select(&mut app, "Blinker");
        app.apply_selected_pattern();
        app.set_speed(1.0);
        app.apply_speed();
        assert!(!app.has_ticker());

        app.start();
        let running_interval = |app: &LifeApp| app.ticker.as_ref().map(|t| t.options().interval);

        app.set_speed(4.0);
        app.set_speed(2.0);
        assert!(app.is_running());
        assert_eq!(running_interval(&app), Some(Duration::from_secs(1)));

        app.apply_speed();
        assert!(app.is_running());
        assert_eq!(running_interval(&app), Some(Duration::from_millis(500)));
    }
}
