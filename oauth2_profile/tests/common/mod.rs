pub mod fixtures;

pub use fixtures::*;
pub use mock_provider::{MockProvider, TEST_DISPLAY_NAME};
