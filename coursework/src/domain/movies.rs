//! Movie collection state.
//!
//! The collection is an explicit value with pure transitions; rendering a card
//! or the empty placeholder is left to the caller.

use std::fmt;

/// Lowest rating a movie can have.
pub const RATING_MIN: u8 = 1;
/// Highest rating a movie can have.
pub const RATING_MAX: u8 = 5;
/// Rating preselected on the form.
pub const DEFAULT_RATING: u8 = 3;

const FILLED_STAR: &str = "⭐";
const EMPTY_STAR: &str = "☆";

/// Raw movie form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieDraft {
    /// Title as typed.
    pub title: String,
    /// Release year; `None` when left blank or unparsable.
    pub year: Option<i32>,
    /// Selected genre; empty when nothing was chosen.
    pub genre: String,
    /// Selected rating; `None` selects [`DEFAULT_RATING`].
    pub rating: Option<u8>,
}

/// Form field that must be refocused after a failed precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieField {
    /// Title input.
    Title,
    /// Genre selector.
    Genre,
}

/// Precondition failures raised before a movie is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieDraftError {
    /// Title is blank once trimmed.
    MissingTitle,
    /// No genre was selected.
    MissingGenre,
}

impl MovieDraftError {
    /// Field the user should be sent back to.
    pub const fn focus(self) -> MovieField {
        match self {
            Self::MissingTitle => MovieField::Title,
            Self::MissingGenre => MovieField::Genre,
        }
    }
}

impl fmt::Display for MovieDraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "Title is required!"),
            Self::MissingGenre => write!(f, "Genre is required!"),
        }
    }
}

impl std::error::Error for MovieDraftError {}

impl MovieDraft {
    /// Check the required fields, title first, and build a [`Movie`].
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition.
    pub fn validate(&self) -> Result<Movie, MovieDraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(MovieDraftError::MissingTitle);
        }
        let genre = self.genre.trim();
        if genre.is_empty() {
            return Err(MovieDraftError::MissingGenre);
        }

        Ok(Movie {
            title: title.to_owned(),
            year: self.year,
            genre: genre.to_owned(),
            rating: self
                .rating
                .unwrap_or(DEFAULT_RATING)
                .clamp(RATING_MIN, RATING_MAX),
        })
    }
}

/// A movie card's contents.
///
/// ## Invariants
/// - `title` and `genre` are non-empty and trimmed.
/// - `rating` is within `RATING_MIN..=RATING_MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    title: String,
    year: Option<i32>,
    genre: String,
    rating: u8,
}

impl Movie {
    /// Movie title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Release year, when known.
    pub const fn year(&self) -> Option<i32> {
        self.year
    }

    /// Genre label.
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Rating within `RATING_MIN..=RATING_MAX`.
    pub const fn rating(&self) -> u8 {
        self.rating
    }

    /// Rating drawn as filled stars followed by empty ones.
    ///
    /// # Examples
    /// ```
    /// use coursework::domain::movies::MovieDraft;
    ///
    /// let movie = MovieDraft {
    ///     title: "Alien".into(),
    ///     genre: "Horror".into(),
    ///     rating: Some(4),
    ///     ..MovieDraft::default()
    /// }
    /// .validate()
    /// .expect("valid draft");
    /// assert_eq!(movie.stars(), "⭐⭐⭐⭐☆");
    /// ```
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating);
        let empty = usize::from(RATING_MAX - self.rating);
        format!("{}{}", FILLED_STAR.repeat(filled), EMPTY_STAR.repeat(empty))
    }
}

/// Stable identifier of a movie within one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MovieId(u64);

impl MovieId {
    /// Wrap a raw identifier, as typed by the user.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of removing a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The movie was removed; `remaining` movies are left.
    Removed {
        /// Movies left after the removal.
        remaining: usize,
    },
    /// No movie has that identifier; nothing changed.
    NotFound,
}

impl Removal {
    /// Whether the removal emptied the collection, so the placeholder shows.
    pub const fn emptied(self) -> bool {
        matches!(self, Self::Removed { remaining: 0 })
    }
}

/// Newest-first movie list with a running count.
#[derive(Debug, Clone, Default)]
pub struct MovieCollection {
    next_id: u64,
    movies: Vec<(MovieId, Movie)>,
}

impl MovieCollection {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a movie and return its identifier.
    pub fn add(&mut self, movie: Movie) -> MovieId {
        self.next_id += 1;
        let id = MovieId(self.next_id);
        self.movies.insert(0, (id, movie));
        id
    }

    /// Remove the movie with `id`.
    pub fn remove(&mut self, id: MovieId) -> Removal {
        let Some(position) = self.movies.iter().position(|(candidate, _)| *candidate == id)
        else {
            return Removal::NotFound;
        };
        self.movies.remove(position);
        Removal::Removed {
            remaining: self.movies.len(),
        }
    }

    /// Number of movies currently listed.
    pub fn count(&self) -> usize {
        self.movies.len()
    }

    /// Whether the empty-state placeholder should be shown.
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Look up one movie.
    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, movie)| movie)
    }

    /// Movies from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = (MovieId, &Movie)> {
        self.movies.iter().map(|(id, movie)| (*id, movie))
    }

    /// Counter text shown above the list.
    pub fn counter_label(&self) -> String {
        format!("Total movies: {}", self.count())
    }
}
