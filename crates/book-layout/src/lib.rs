//! Book page layout and composition engine
//!
//! Turns a manuscript into a paginated, spread-navigable document with
//! freeform image placement, bounded undo/redo and debounced autosave.

pub mod autosave;
pub mod canvas;
pub mod config;
pub mod constants;
pub mod design;
mod document;
mod history;
mod page;
pub mod pagination;
pub mod spread;
mod stats;
mod types;

pub use autosave::{AutosaveCoordinator, MemoryPersistence, Persistence, SaveOutcome, SaveStatus};
#[cfg(feature = "serde")]
pub use autosave::JsonFilePersistence;
pub use canvas::{
    CanvasState, ContainerSize, Geometry, ImagePlacement, PointerPos, Selection, SessionKind,
};
pub use config::templates::{Template, template, template_names};
pub use config::*;
pub use design::{DesignProposal, MergeReport, MergeSelection, Priority};
pub use document::*;
pub use history::History;
pub use page::*;
pub use pagination::{Chapter, Manuscript};
pub use spread::{Spread, SpreadNavigator, SpreadSlot, spread_count};
pub use stats::*;
pub use types::*;
