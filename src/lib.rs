#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod context;
pub mod document;
pub mod geo;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub(crate) mod text_metrics;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{LayoutConfig, load_config};
pub use context::{CancellationToken, LayoutContext};
pub use document::{DocumentError, SequenceDocument};
pub use geo::{Point, Rect};
pub use ir::{Edge, EdgeKind, Graph, Object, ObjectId, ObjectRole};
pub use layout::{LayoutError, layout, layout_with_config};
pub use layout_dump::{LayoutDump, write_layout_dump};
