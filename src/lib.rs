pub mod bench;
pub mod config;
pub mod context;
pub mod error;
pub mod renderer;
pub mod report;
pub mod rng;
pub mod scene;

pub use bench::{BenchmarkSession, SchedulerState, StatusDisplay, StatusText, Tick};
pub use config::AppConfig;
pub use error::{BenchError, BenchResult};
pub use renderer::{HeadlessDisplay, HostLoop, NativeTimer, VirtualTimer};
pub use report::BenchmarkReport;
pub use rng::RandomSequencer;
pub use scene::{DisplayMetrics, Pass, Scene, SceneKind, SceneRegistry};
