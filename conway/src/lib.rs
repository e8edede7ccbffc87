//! Conway's Game of Life on a fixed, edge-bounded board.
//!
//! [`GridEngine`] owns the board and the generation counter and is driven by plain
//! method calls. Timing lives outside it: [`Ticker`] is a tokio task that steps a
//! shared engine on an interval and forwards each snapshot to a sink.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod observer;
pub mod patterns;
pub mod ticker;

pub use config::LifeConfig;
pub use engine::GridEngine;
pub use error::{ConfigError, EngineError};
pub use grid::{Cell, Grid, GridSnapshot};
pub use history::CycleDetector;
pub use observer::{GenerationObserver, ObserverId};
pub use patterns::{Pattern, PATTERNS};
pub use ticker::{SharedEngine, Ticker, TickerExit, TickerOptions};
