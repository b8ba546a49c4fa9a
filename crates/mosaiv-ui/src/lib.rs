pub mod app;
pub mod message;
pub mod upload;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
