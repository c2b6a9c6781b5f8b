/// Rendering shapes into SVG documents
#[cfg(feature = "svg")]
pub mod svg;
