pub mod window_icon;
