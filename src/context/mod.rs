pub mod benchmark;

pub use benchmark::{BenchmarkContext, ConsoleStatus, RunSettings};
