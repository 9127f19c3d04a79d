pub mod score;
pub mod session;
pub mod status;

pub use session::{BenchmarkSession, SchedulerState, Tick, SCENE_TIME};
pub use status::{StatusDisplay, StatusText};
