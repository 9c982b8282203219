mod fixtures;
pub mod tracing;

pub use fixtures::{fixture_path, request};
pub use tracing::{CapturedEvent, capture_events};
