use crate::{
    error::Result,
    grid::ModuleGrid,
    options::Style,
    outline::TracedOutline,
    traits::ModuleRenderer,
};

/// A single compound path traced around the dark region, drawn in grid
/// units and scaled into place by a transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathRenderer;

impl PathRenderer {
    pub const DEFAULT_MODULE_SIZE: u32 = 10;
}

impl ModuleRenderer for PathRenderer {
    fn default_module_size(&self) -> u32 {
        Self::DEFAULT_MODULE_SIZE
    }

    fn render(&self, grid: &dyn ModuleGrid, style: &Style) -> Result<String> {
        let outline = TracedOutline::trace(grid)?;
        if outline.is_empty() {
            return Ok(String::new());
        }

        Ok(format!(
            r#"<path d="{}" style="fill:#{}" transform="translate({},{}) scale({})"/>"#,
            outline.path_data(),
            style.color,
            style.offset,
            style.offset,
            style.module_size
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BitGrid;

    #[test]
    fn test_isolated_module_path() {
        let grid = BitGrid::parse("...\n.#.\n...").expect("Should parse");
        let style = Style {
            module_size: 10,
            offset: 5,
            color: "123456".to_string(),
        };

        let body = PathRenderer.render(&grid, &style).expect("Should render");
        assert_eq!(
            body,
            r#"<path d="M1 1h1v1h-1v-1z" style="fill:#123456" transform="translate(5,5) scale(10)"/>"#
        );
    }

    #[test]
    fn test_empty_grid_has_no_path() {
        let style = Style {
            module_size: 10,
            offset: 0,
            color: "000".to_string(),
        };
        let body = PathRenderer.render(&BitGrid::new(4), &style).expect("Should render");
        assert!(body.is_empty());
    }
}
