use shared::domain::{DisplayMode, MenuEntry};

pub const GRID_TITLE: &str = "Movies";

pub fn derive_title(mode: DisplayMode, selected_index: usize) -> String {
    match mode {
        DisplayMode::Grid => GRID_TITLE.to_string(),
        DisplayMode::List => MenuEntry::ALL[selected_index].title().to_string(),
    }
}
