//! # foldtext - Folding text for terminal UIs
//!
//! A text component that shows at most a configured number of lines and
//! offers a more/less toggle. While collapsed the last visible line is cut
//! so that an ellipsis and a fold label (or a chevron) fit after it; while
//! expanded the full text is shown, optionally followed by an expand label.
//!
//! ## Architecture Overview
//!
//! - **Domain** (`domain`): line fitting against a [`LayoutProbe`], toggle
//!   region geometry and configuration
//! - **Model** (`model`): the [`FoldText`] component, driven by [`Message`]s
//!   from its host
//! - **Presentation** (`presentation`): a ratatui widget rendering a frame
//! - **Infrastructure** (`infrastructure`): terminal cell measurement, config
//!   files, CLI and the TUI backend
//!
//! ## Example Usage
//!
//! ```rust
//! use foldtext::{CellProbe, FoldConfig, FoldText, Insets, Message, ViewBox};
//!
//! let mut fold = FoldText::new(CellProbe::new(), FoldConfig::default());
//! fold.set_text("a".repeat(200));
//!
//! // Work is deferred until the host has laid the component out.
//! fold.update(Message::LayoutChanged(ViewBox::new(20.0, 4.0, Insets::default())));
//! fold.update(Message::PreDraw);
//!
//! let frame = fold.frame().unwrap();
//! assert!(frame.is_over_max_line());
//! assert_eq!(frame.line_count(), 4);
//!
//! fold.update(Message::Click);
//! assert!(fold.is_expanded());
//! ```

pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod model;
pub mod presentation;
pub mod test_helpers;
pub mod utils;

pub use domain::config::{FoldConfig, IndicatorMode, TipGravity};
pub use domain::geometry::{Insets, RegionRect, ViewBox};
pub use domain::layout::{FontMetrics, LayoutProbe, LayoutSnapshot, LineBounds};
pub use domain::region::ToggleRegion;
pub use domain::toggle::ToggleState;
pub use domain::truncation::{truncate, Truncation};
pub use infrastructure::cell_probe::CellProbe;
pub use model::fold_text::{FoldText, Message};
pub use presentation::widgets::fold_text::FoldTextWidget;

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
