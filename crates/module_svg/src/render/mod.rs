pub mod rect;
pub mod path;
pub mod document;

pub use rect::*;
pub use path::*;
pub use document::*;

use crate::{options::RenderStrategy, traits::ModuleRenderer};

/// Renderer implementing `strategy`
pub fn renderer_for(strategy: RenderStrategy) -> Box<dyn ModuleRenderer> {
    match strategy {
        RenderStrategy::Rects => Box::new(RectRenderer),
        RenderStrategy::Path => Box::new(PathRenderer),
    }
}
