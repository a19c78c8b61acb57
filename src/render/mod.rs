//! Visualizations: wpm distribution plot, word cloud, terminal views.
//!
//! Each figure is drawn as an SVG scene, then rasterized to PNG unless the
//! output name asks for `.svg`.

pub mod cloud;
pub mod histogram;
pub mod raster;
pub mod svg;
pub mod terminal;

pub use cloud::{CloudLayout, PlacedWord, layout_cloud};
pub use histogram::{DistributionPlot, Histogram, gaussian_kde, render_distribution};
pub use raster::{png_dimensions, rasterize, write_figure};
pub use svg::{Anchor, SvgDocument, TextStyle};
