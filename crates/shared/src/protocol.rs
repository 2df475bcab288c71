use serde::{Deserialize, Serialize};

use crate::domain::{Genre, Movie};

/// Query parameter names understood by the catalog API.
pub const PARAM_PAGE: &str = "page";
pub const PARAM_LANGUAGE: &str = "language";
pub const PARAM_REGION: &str = "region";

/// One page of a paginated movie listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieListPage {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreListResponse {
    pub genres: Vec<Genre>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GenreId, MovieId};

    #[test]
    fn decodes_movie_page_without_totals() {
        let page: MovieListPage =
            serde_json::from_str(r#"{"results": [{"id": 1, "title": "Heat"}]}"#).expect("decode");
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, MovieId(1));
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn genre_payload_does_not_decode_as_movie_page() {
        let raw = r#"{"genres": [{"id": 28, "name": "Action"}]}"#;
        assert!(serde_json::from_str::<MovieListPage>(raw).is_err());
        let genres: GenreListResponse = serde_json::from_str(raw).expect("decode");
        assert_eq!(genres.genres[0].id, GenreId(28));
    }
}
