pub mod dropdown;
pub mod radio;
pub mod slider;
pub mod text_field_set;
