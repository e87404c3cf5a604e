use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

/// Which primitive set the document body is drawn with.
#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq, Default
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RenderStrategy {
    /// One square per dark module
    #[default]
    Rects,
    /// One compound path traced around the dark region
    Path,
}

/// Options recognised by the document renderer.
///
/// Color and shape-rendering strings are written into the output as given.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct RenderOptions {
    /// Pixel padding on all sides
    pub offset: u32,
    /// Background color (hex without `#`); no background when unset
    pub fill: Option<String>,
    /// Module color (hex without `#`)
    pub color: String,
    /// Pixel size of one module; 11 for rects and 10 for paths when unset
    pub module_size: Option<u32>,
    /// Value of the `shape-rendering` attribute
    pub shape_rendering: String,
    /// Emit a complete document rather than an embeddable fragment
    pub standalone: bool,
    /// Trace a single path instead of emitting one rect per module
    pub use_path: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            fill: None,
            color: "000".to_string(),
            module_size: None,
            shape_rendering: "crispEdges".to_string(),
            standalone: true,
            use_path: false,
        }
    }
}

impl RenderOptions {
    /// JSON schema for the option file format
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(RenderOptions)
    }

    pub fn strategy(&self) -> RenderStrategy {
        if self.use_path {
            RenderStrategy::Path
        } else {
            RenderStrategy::Rects
        }
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_module_size(mut self, module_size: u32) -> Self {
        self.module_size = Some(module_size);
        self
    }

    pub fn with_shape_rendering(mut self, hint: impl Into<String>) -> Self {
        self.shape_rendering = hint.into();
        self
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_strategy(mut self, strategy: RenderStrategy) -> Self {
        self.use_path = strategy == RenderStrategy::Path;
        self
    }

    /// Resolve the per-primitive style, filling in the strategy's default
    /// module size.
    pub fn style(&self, default_module_size: u32) -> Style {
        Style {
            module_size: self.module_size.unwrap_or(default_module_size),
            offset: self.offset,
            color: self.color.clone(),
        }
    }
}

/// Resolved drawing parameters handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub module_size: u32,
    pub offset: u32,
    pub color: String,
}
