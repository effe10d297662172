//! Behaviour tests for the movie collection.

use std::cell::RefCell;

use coursework::domain::{MovieCollection, MovieDraft, MovieDraftError, MovieId, Removal};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct MovieWorld {
    movies: RefCell<MovieCollection>,
    removal: RefCell<Option<Removal>>,
    rejection: RefCell<Option<MovieDraftError>>,
}

impl MovieWorld {
    fn submit(&self, draft: &MovieDraft) {
        match draft.validate() {
            Ok(movie) => {
                self.movies.borrow_mut().add(movie);
            }
            Err(error) => *self.rejection.borrow_mut() = Some(error),
        }
    }
}

#[fixture]
fn world() -> MovieWorld {
    MovieWorld::default()
}

#[given("an empty movie collection")]
fn an_empty_movie_collection(world: &MovieWorld) {
    assert!(world.movies.borrow().is_empty());
}

#[when("the movie {title} in genre {genre} is added")]
fn the_movie_is_added(world: &MovieWorld, title: String, genre: String) {
    world.submit(&MovieDraft {
        title,
        genre,
        ..MovieDraft::default()
    });
}

#[when("a movie titled {title} is submitted without a genre")]
fn a_movie_is_submitted_without_a_genre(world: &MovieWorld, title: String) {
    world.submit(&MovieDraft {
        title,
        ..MovieDraft::default()
    });
}

#[when("movie {id} is removed")]
fn movie_is_removed(world: &MovieWorld, id: u64) {
    let removal = world.movies.borrow_mut().remove(MovieId::new(id));
    *world.removal.borrow_mut() = Some(removal);
}

#[then("the counter reads {label}")]
fn the_counter_reads(world: &MovieWorld, label: String) {
    assert_eq!(world.movies.borrow().counter_label(), label);
}

#[then("the newest movie is {title}")]
fn the_newest_movie_is(world: &MovieWorld, title: String) {
    let movies = world.movies.borrow();
    let (_, newest) = movies.iter().next().expect("at least one movie");
    assert_eq!(newest.title(), title);
}

#[then("the collection reports it became empty")]
fn the_collection_reports_it_became_empty(world: &MovieWorld) {
    let removal = world.removal.borrow().expect("a removal was attempted");
    assert!(removal.emptied());
    assert!(world.movies.borrow().is_empty());
}

#[then("the removal is reported as not found")]
fn the_removal_is_reported_as_not_found(world: &MovieWorld) {
    assert_eq!(*world.removal.borrow(), Some(Removal::NotFound));
}

#[then("the draft is refused with {message}")]
fn the_draft_is_refused_with(world: &MovieWorld, message: String) {
    let rejection = world.rejection.borrow().expect("the draft was refused");
    assert_eq!(rejection.to_string(), message);
}

#[scenario(
    path = "tests/features/movie_list.feature",
    name = "Added movies appear newest first"
)]
fn added_movies_appear_newest_first(world: MovieWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/movie_list.feature",
    name = "Removing the last movie empties the collection"
)]
fn removing_the_last_movie_empties_the_collection(world: MovieWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/movie_list.feature",
    name = "Unknown identifiers change nothing"
)]
fn unknown_identifiers_change_nothing(world: MovieWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/movie_list.feature",
    name = "A draft without a genre is refused"
)]
fn a_draft_without_a_genre_is_refused(world: MovieWorld) {
    drop(world);
}
