use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(MovieId);
id_newtype!(GenreId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    List,
    Grid,
}

impl DisplayMode {
    /// Icon token for the button that swaps to the other layout.
    pub fn icon(self) -> &'static str {
        match self {
            DisplayMode::List => "rectangle.3.offgrid.fill",
            DisplayMode::Grid => "rectangle.grid.1x2",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::List => DisplayMode::Grid,
            DisplayMode::Grid => DisplayMode::List,
        }
    }
}

/// Home menu categories in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuEntry {
    NowPlaying,
    Popular,
    TopRated,
    Upcoming,
    Genres,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 5] = [
        MenuEntry::NowPlaying,
        MenuEntry::Popular,
        MenuEntry::TopRated,
        MenuEntry::Upcoming,
        MenuEntry::Genres,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MenuEntry::NowPlaying => "Now Playing",
            MenuEntry::Popular => "Popular",
            MenuEntry::TopRated => "Top Rated",
            MenuEntry::Upcoming => "Upcoming",
            MenuEntry::Genres => "Genres",
        }
    }

    /// Catalog endpoint path, relative to the API base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            MenuEntry::NowPlaying => "movie/now_playing",
            MenuEntry::Popular => "movie/popular",
            MenuEntry::TopRated => "movie/top_rated",
            MenuEntry::Upcoming => "movie/upcoming",
            MenuEntry::Genres => "genre/movie/list",
        }
    }

    pub fn is_genres(self) -> bool {
        self == MenuEntry::Genres
    }

    pub fn at(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default, deserialize_with = "optional_release_date")]
    pub release_date: Option<NaiveDate>,
}

impl Movie {
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release_date.map(|date| date.year())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

// The catalog sends "" for unreleased titles instead of omitting the field.
fn optional_release_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
