//! # Module Grid Vector Rendering
//!
//! Renders a square grid of dark/light modules (the cells of a 2-D
//! barcode, for instance) as SVG. Two strategies are available:
//!
//! - **Rects**: one `<rect>` per dark module.
//! - **Path**: the boundary of the dark region is traced into closed loops
//!   and written as one run-length encoded `<path>`. Holes wind opposite
//!   to outer boundaries, so the single path fills exactly the same
//!   modules as the rects with far fewer primitives.
//!
//! ## Quick Start
//!
//! ```rust
//! use module_svg::{BitGrid, RenderOptions, render_svg};
//!
//! let grid = BitGrid::parse("###\n#.#\n###")?;
//! let options = RenderOptions::default().with_offset(5);
//!
//! let svg = render_svg(&grid, &options)?;
//! assert!(svg.contains(r#"width="43""#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Traced Outline
//!
//! ```rust
//! use module_svg::{BitGrid, TracedOutline};
//!
//! let grid = BitGrid::parse("###\n#.#\n###")?;
//! let outline = TracedOutline::trace(&grid)?;
//!
//! assert_eq!(outline.path_data(), "M0 0h3v3h-3v-3zM1 1v1h1v-1h-1z");
//! assert_eq!(outline.rasterize(), grid);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod grid;
pub mod options;
pub mod traits;
pub mod algorithms;
pub mod outline;
pub mod render;
pub mod io;

// Re-exports for convenience
pub use error::{OutlineError, Result};
pub use types::{Direction, Edge, Loop, Vertex, Winding};
pub use grid::{BitGrid, ModuleGrid};
pub use options::{RenderOptions, RenderStrategy, Style};
pub use traits::*;
pub use algorithms::*;
pub use outline::TracedOutline;
pub use render::{PathRenderer, RectRenderer, SvgDocument, canvas_dimension, render_svg, renderer_for};
pub use io::*;
