// Domain colouring for complex-valued functions.
//
// A function of z is sampled over a rectangular viewport of the complex
// plane; the phase of each value picks a hue and the magnitude, folded
// into periodic height-line bands, drives saturation and value. The
// pipeline is grid -> evaluate -> normalize -> colour -> image, wrapped in
// a render controller where a newer request supersedes an older render
// rather than interrupting it.

pub mod color;
pub mod error;
pub mod expr;
pub mod grid;
pub mod normalize;
pub mod plot;
pub mod render;
pub mod special;

pub use error::{PlotError, PlotResult};
pub use expr::{preprocess, Function};
pub use grid::{ComplexField, Grid};
pub use normalize::{normalize, NormalizedField};
pub use plot::PlotSpec;
pub use render::{render, render_frame, Plotter, RenderHandle, RenderOutcome, RenderResult};
