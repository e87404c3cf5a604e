use std::fmt;

use crate::{
    error::Result,
    grid::ModuleGrid,
    options::RenderOptions,
    render::renderer_for,
};

const XML_DECLARATION: &str = r#"<?xml version="1.0" standalone="yes"?>"#;

/// A rendered body together with the framing the options asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    /// Canvas width and height in pixels
    pub dimension: u64,
    /// Background color, drawn as a full-canvas rect first
    pub background: Option<String>,
    /// Fragment produced by the strategy; empty for an all-light grid
    pub body: String,
    /// `shape-rendering` attribute of the root element
    pub shape_rendering: String,
    /// Whether to emit the XML declaration and root element
    pub standalone: bool,
}

impl SvgDocument {
    /// Render `grid` with the strategy and framing selected by `options`.
    pub fn render<G: ModuleGrid + ?Sized>(grid: &G, options: &RenderOptions) -> Result<Self> {
        let strategy = options.strategy();
        let renderer = renderer_for(strategy);
        let style = options.style(renderer.default_module_size());

        let dimension = canvas_dimension(grid.module_count(), style.module_size, style.offset);
        let body = renderer.render(&grid, &style)?;

        tracing::debug!(
            %strategy,
            module_count = grid.module_count(),
            module_size = style.module_size,
            dimension,
            "rendered document"
        );

        Ok(Self {
            dimension,
            background: options.fill.clone(),
            body,
            shape_rendering: options.shape_rendering.clone(),
            standalone: options.standalone,
        })
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if self.standalone {
            lines.push(XML_DECLARATION.to_string());
            lines.push(format!(
                r#"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:ev="http://www.w3.org/2001/xml-events" width="{d}" height="{d}" shape-rendering="{}">"#,
                self.shape_rendering,
                d = self.dimension,
            ));
        }

        if let Some(fill) = &self.background {
            lines.push(format!(
                r#"<rect width="{d}" height="{d}" x="0" y="0" style="fill:#{fill}"/>"#,
                d = self.dimension,
            ));
        }

        if !self.body.is_empty() {
            lines.push(self.body.clone());
        }

        if self.standalone {
            lines.push("</svg>".to_string());
        }

        lines
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// `N * module_size + 2 * offset`
pub fn canvas_dimension(module_count: usize, module_size: u32, offset: u32) -> u64 {
    module_count as u64 * u64::from(module_size) + 2 * u64::from(offset)
}

/// Render `grid` to a complete document or fragment string.
pub fn render_svg<G: ModuleGrid + ?Sized>(grid: &G, options: &RenderOptions) -> Result<String> {
    Ok(SvgDocument::render(grid, options)?.to_string())
}
