//! Core library for batch subtitle translation.
//! Everything here runs without a window so the batch can be driven from tests.

pub mod batch;
pub mod config;
pub mod encoding;
pub mod session;
pub mod srt;
pub mod translate;
