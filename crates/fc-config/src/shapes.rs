use serde::Deserialize;

/// One entry of the `[shapes]` table: a declared object shape, optionally
/// descending from another declared shape.
///
/// ```toml
/// [shapes]
/// document = {}
/// weblink = { extends = "document" }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShapeConfig {
    /// Parent shape name. A rule constrained to the parent also matches
    /// objects of this shape.
    #[serde(default)]
    pub extends: Option<String>,
}
