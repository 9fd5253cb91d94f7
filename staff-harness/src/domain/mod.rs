pub mod client;
pub mod expectation;
pub mod payload;
