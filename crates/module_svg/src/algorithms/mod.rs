pub mod edges;
pub mod index;
pub mod trace;
pub mod encoding;

pub use edges::*;
pub use index::*;
pub use trace::*;
pub use encoding::*;
