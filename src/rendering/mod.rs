pub mod board_view;
pub mod camera;
pub mod palette;
pub mod window_icon;
