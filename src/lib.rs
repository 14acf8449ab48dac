//! In-memory filtering, faceting and ordering of a player's gear.
//!
//! ```rust,ignore
//! use gearsift::{GearView, MemorySettings, ViewConfig};
//!
//! let mut view = GearView::new(ViewConfig::default(), MemorySettings::new());
//! view.load_json(&snapshot)?;
//! view.set_filter_text("is:light>=900 and !is:locked");
//! for item in view.visible() {
//!     println!("{} {}", item.power, item.name);
//! }
//! ```

pub mod config;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod session;
pub mod settings;

pub use config::ViewConfig;
pub use errors::GearError;
pub use filtering::{FilterQuery, SortField, SortSpec, ViewWindow, apply, parse};
pub use models::{Category, Item, Mark, Player};
pub use session::GearView;
pub use settings::{JsonFileSettings, MemorySettings, SettingsStore};
