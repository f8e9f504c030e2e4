pub mod level_bar;
pub mod results_panel;
pub mod target_panel;
pub mod typing_box;
