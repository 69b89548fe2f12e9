pub mod details;
pub mod dialog;
pub mod info_popup;
pub mod overlay;
pub mod tabs;
pub mod ui;
