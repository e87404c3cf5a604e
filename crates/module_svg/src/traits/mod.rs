use crate::{error::Result, grid::ModuleGrid, options::Style};

/// A strategy that turns a module grid into drawing primitives.
pub trait ModuleRenderer: Send + Sync {
    /// Pixel size of one module when the options leave it unset.
    fn default_module_size(&self) -> u32;

    /// Render the dark modules as an embeddable fragment. An all-light grid
    /// renders to an empty string.
    fn render(&self, grid: &dyn ModuleGrid, style: &Style) -> Result<String>;
}
