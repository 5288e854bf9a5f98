pub mod fixtures;
pub mod lines;
pub mod tracing;

pub use fixtures::{fixture_path, load_fixture};
pub use lines::{LineBuilder, LogBuilder};
pub use tracing::{CapturedEvent, capture_events};
