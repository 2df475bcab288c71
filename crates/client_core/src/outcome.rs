//! Fetch orders handed to the gateway and the completions it posts back.

use shared::{
    domain::{Genre, Movie},
    error::FetchError,
};
use tracing::warn;

use crate::{bus::SignalLine, latest::RequestToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    MoviePage { page: u32 },
    Genres,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: RequestToken,
    pub endpoint: &'static str,
    pub params: Vec<(String, String)>,
    pub target: FetchTarget,
}

impl FetchRequest {
    pub fn line(&self) -> SignalLine {
        match self.target {
            FetchTarget::MoviePage { .. } => SignalLine::Page,
            FetchTarget::Genres => SignalLine::Category,
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum Completion {
    Movies {
        token: RequestToken,
        page: u32,
        result: Result<Vec<Movie>, FetchError>,
    },
    Genres {
        token: RequestToken,
        result: Result<Vec<Genre>, FetchError>,
    },
}

impl Completion {
    pub fn token(&self) -> RequestToken {
        match self {
            Completion::Movies { token, .. } | Completion::Genres { token, .. } => *token,
        }
    }

    pub fn line(&self) -> SignalLine {
        match self {
            Completion::Movies { .. } => SignalLine::Page,
            Completion::Genres { .. } => SignalLine::Category,
        }
    }
}

/// Absorbs a failed fetch: the error is logged and the caller sees an empty
/// result, so merge logic runs the same way for failures and empty pages.
pub fn results_or_empty<T>(line: SignalLine, result: Result<Vec<T>, FetchError>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!(
                line = %line,
                kind = ?err.kind(),
                endpoint = err.endpoint(),
                "catalog fetch failed, treating as empty: {err}"
            );
            Vec::new()
        }
    }
}
