//! Shared utilities for the animation loop.

pub mod frame_timing;
