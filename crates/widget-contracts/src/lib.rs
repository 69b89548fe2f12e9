//! DOM-free state and descriptor types shared by the fizz widgets.
//!
//! Every widget keeps its interaction state here so that the rules
//! (selection ranges, overlay lifecycle, tab visibility, panel absorption)
//! can be exercised without a browser.

pub mod barrier;
pub mod details;
pub mod dialog;
pub mod dropdown;
pub mod error;
pub mod ordered;
pub mod overlay;
pub mod radio;
pub mod slider;
pub mod tab_details;
pub mod tab_view;
pub mod tabs;
pub mod text_fields;

pub use error::{WidgetError, WidgetResult};
pub use ordered::OrderedMap;
