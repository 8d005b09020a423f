pub mod diagram_popup;
pub mod kana_grid;
pub mod menu;
pub mod phrase_list;
pub mod practice_area;
pub mod progress_bar;
pub mod results;
pub mod stats_panel;
