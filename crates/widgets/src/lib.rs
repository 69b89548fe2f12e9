//! Leptos components for the fizz widget set.
//!
//! Interaction rules live in `widget_contracts`; this crate renders the
//! markup, wires DOM events to that state and exposes `Copy` handles the host
//! can hold on to.

pub mod components;
pub mod shared;

pub use components::details::{Details, DetailsHandle};
pub use components::dialog::{
    ConfirmDialog, ConfirmDialogHandle, Dialog, DialogHandle, MessageDialog, MessageDialogHandle,
};
pub use components::info_popup::InfoPopup;
pub use components::overlay::{Overlay, OverlayHandle};
pub use components::tabs::tab_details::{TabDetails, TabDetailsHandle, TabDetailsPanel};
pub use components::tabs::tab_view::{TabList, TabPanel, TabPanelGroup, TabView};
pub use components::ui::dropdown::{Dropdown, DropdownHandle};
pub use components::ui::radio::{RadioGroup, RadioGroupHandle};
pub use components::ui::slider::Slider;
pub use components::ui::text_field_set::{TextFieldSet, TextFieldSetHandle};
pub use widget_contracts::{WidgetError, WidgetResult};

/// Installs the console logger and the panic hook. Call once from the host's
/// entry point.
pub fn init_logging(level: log::Level) {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();
}
