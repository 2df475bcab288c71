use shared::domain::{DisplayMode, Genre, MenuEntry, Movie};

/// Everything the rendering layer reads. Owned by the home actor and
/// published as a whole after every processed step.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub mode: DisplayMode,
    pub swap_icon: String,
    pub nav_title: String,
    pub selected_index: usize,
    pub page: u32,
    pub movies: Vec<Movie>,
    pub genres: Vec<Genre>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            mode: DisplayMode::List,
            swap_icon: String::new(),
            nav_title: String::new(),
            selected_index: 0,
            page: 1,
            movies: Vec::new(),
            genres: Vec::new(),
        }
    }
}

impl HomeState {
    pub fn selected_entry(&self) -> MenuEntry {
        MenuEntry::ALL[self.selected_index]
    }
}
