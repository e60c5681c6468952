pub mod hit;
pub mod surface;
pub mod svg;

pub use hit::{hit_test, node_from_annotation, resolve_target};
pub use surface::RenderSurface;
pub use svg::{SvgElement, render_document};
