use crate::{error::Result, grid::ModuleGrid, options::Style, traits::ModuleRenderer};

/// One filled square per dark module.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectRenderer;

impl RectRenderer {
    pub const DEFAULT_MODULE_SIZE: u32 = 11;
}

impl ModuleRenderer for RectRenderer {
    fn default_module_size(&self) -> u32 {
        Self::DEFAULT_MODULE_SIZE
    }

    fn render(&self, grid: &dyn ModuleGrid, style: &Style) -> Result<String> {
        let n = grid.module_count();
        let size = style.module_size as usize;
        let offset = style.offset as usize;
        let mut lines = Vec::new();

        for row in 0..n {
            let mut line = String::new();
            for col in (0..n).filter(|&col| grid.is_dark(row, col)) {
                let x = col * size + offset;
                let y = row * size + offset;
                line.push_str(&format!(
                    r#"<rect width="{size}" height="{size}" x="{x}" y="{y}" style="fill:#{}"/>"#,
                    style.color
                ));
            }
            if !line.is_empty() {
                lines.push(line);
            }
        }

        tracing::debug!(module_count = n, rows = lines.len(), "rendered rects");
        Ok(lines.join("\n"))
    }
}
