//! Memory layouts shared between CPU code and shaders.
//!
//! The slot enumerations in [`graphics::constants`] and the structs in
//! [`graphics::layout`] are the single description of what shaders read; the WGSL side
//! is generated from them by [`graphics::wgsl::generate_wgsl`].

pub mod graphics;
