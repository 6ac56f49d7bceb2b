pub mod app;
pub mod controls_panel;
pub mod countdown_overlay;
pub mod game_view;
pub mod status_display;
