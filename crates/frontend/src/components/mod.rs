pub mod bottom_sheet;
pub mod header;
pub mod map_view;
pub mod menu_list;
pub mod range_field;
pub mod sidebar;
