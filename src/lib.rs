//! Artifactor generates tiny deterministic pixel-art "artifacts": 8x8,
//! two-color, symmetric, and addressed by a 32-bit id that fully
//! determines their appearance. The library carries the generator, the
//! gallery browsing logic, BMP export, and the windowed shell the
//! front-end binaries are built on.

pub mod export;
pub mod font;
pub mod gallery;
pub mod generator;
pub mod input;
pub mod render;
pub mod shell;

pub use generator::{
    generate, generate_with_alpha, AlphaPolicy, Cell, Color, Grid, GENERATED_SIZE,
};
