pub mod field_item;
pub mod modal_frame;
pub mod pager;
pub mod source_picker;
