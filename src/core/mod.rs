/// Core module for loading the inputs and invoking the correlation library
///
/// This module contains the file loader, the boundary traits for the external
/// correlation function, and the pipeline tying them together.

pub mod bridge;
pub mod loader;
#[cfg(feature = "native")]
pub mod native;
pub mod pipeline;
