pub mod dom;
pub mod error_view;
pub mod icons;
