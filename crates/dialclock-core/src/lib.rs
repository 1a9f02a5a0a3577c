pub mod clock;
pub mod config;
pub mod host;
pub mod services;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use host::ClockHost;
