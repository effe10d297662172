//! Interactive movie list session.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use super::{CliError, Prompter};
use crate::domain::movies::{DEFAULT_RATING, MovieField, RATING_MAX, RATING_MIN};
use crate::domain::registration::parse_leading_integer;
use crate::domain::{Movie, MovieCollection, MovieDraft, MovieId, Removal};

const EMPTY_TITLE: &str = "🎬 No movies added yet!";
const EMPTY_HINT: &str = "Add your first movie to start the collection.";
const HELP: &str = "Commands: add, remove <id>, list, help, quit";

enum SessionCommand {
    Add,
    Remove(MovieId),
    List,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let mut words = line.split_whitespace();
    let command = match (words.next(), words.next()) {
        (Some("add"), None) => SessionCommand::Add,
        (Some("list"), None) => SessionCommand::List,
        (Some("help"), None) => SessionCommand::Help,
        (Some("quit" | "exit"), None) => SessionCommand::Quit,
        (Some("remove"), Some(raw)) => raw
            .parse::<u64>()
            .map(|raw| SessionCommand::Remove(MovieId::new(raw)))
            .map_err(|_| format!("Not a movie id: {raw}"))?,
        (Some("remove"), None) => return Err("Usage: remove <id>".to_owned()),
        _ => return Err(format!("Unknown command: {}", line.trim())),
    };
    if words.next().is_some() {
        return Err(format!("Unknown command: {}", line.trim()));
    }
    Ok(command)
}

/// Years read like form numbers: `"1979abc"` is 1979, while blank or
/// non-numeric text leaves the year unset.
fn parse_year(raw: &str) -> Option<i32> {
    parse_leading_integer(raw).and_then(|year| i32::try_from(year).ok())
}

fn parse_rating(raw: &str) -> Option<u8> {
    let rating = raw.trim().parse::<i64>().ok()?;
    let clamped = rating.clamp(i64::from(RATING_MIN), i64::from(RATING_MAX));
    u8::try_from(clamped).ok()
}

fn render_card(out: &mut impl Write, id: MovieId, movie: &Movie) -> Result<(), CliError> {
    match movie.year() {
        Some(year) => writeln!(out, "[{id}] {} ({year})", movie.title())?,
        None => writeln!(out, "[{id}] {}", movie.title())?,
    }
    writeln!(out, "    Genre: {}", movie.genre())?;
    writeln!(out, "    Rating: {}", movie.stars())?;
    Ok(())
}

fn render_collection(out: &mut impl Write, movies: &MovieCollection) -> Result<(), CliError> {
    writeln!(out, "{}", movies.counter_label())?;
    if movies.is_empty() {
        writeln!(out, "{EMPTY_TITLE}")?;
        writeln!(out, "{EMPTY_HINT}")?;
        return Ok(());
    }
    for (id, movie) in movies.iter() {
        render_card(out, id, movie)?;
    }
    Ok(())
}

fn add_movie<R, W>(
    prompter: &mut Prompter<R, W>,
    movies: &mut MovieCollection,
) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
{
    let title = prompter.ask("Title: ")?;
    let year = prompter.ask("Year: ")?;
    let genre = prompter.ask("Genre: ")?;
    let rating = prompter.ask(&format!("Rating ({RATING_MIN}-{RATING_MAX}) [{DEFAULT_RATING}]: "))?;

    let draft = MovieDraft {
        title,
        year: parse_year(&year),
        genre,
        rating: parse_rating(&rating),
    };
    match draft.validate() {
        Ok(movie) => {
            let id = movies.add(movie);
            info!(%id, count = movies.count(), "movie added");
            if let Some(movie) = movies.get(id) {
                render_card(prompter.output(), id, movie)?;
            }
            prompter.say(movies.counter_label())?;
        }
        Err(err) => {
            let field = match err.focus() {
                MovieField::Title => "title",
                MovieField::Genre => "genre",
            };
            debug!(field, "movie draft rejected");
            prompter.say(err)?;
        }
    }
    Ok(())
}

fn remove_movie<R, W>(
    prompter: &mut Prompter<R, W>,
    movies: &mut MovieCollection,
    id: MovieId,
) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
{
    let removal = movies.remove(id);
    match removal {
        Removal::Removed { remaining } => {
            info!(%id, remaining, "movie removed");
            prompter.say(movies.counter_label())?;
            if removal.emptied() {
                prompter.say(EMPTY_TITLE)?;
                prompter.say(EMPTY_HINT)?;
            }
        }
        Removal::NotFound => {
            warn!(%id, "no movie with that id");
            prompter.say(format_args!("No movie with id {id}."))?;
        }
    }
    Ok(())
}

/// Run the movie session until `quit` or end of input.
///
/// Returns the collection as it stood when the session ended.
///
/// # Errors
///
/// Returns [`CliError::Io`] when reading or writing fails. End of input is
/// a normal way to leave the session.
pub fn run_movie_session<R, W>(prompter: &mut Prompter<R, W>) -> Result<MovieCollection, CliError>
where
    R: BufRead,
    W: Write,
{
    let mut movies = MovieCollection::new();
    render_collection(prompter.output(), &movies)?;
    prompter.say(HELP)?;

    loop {
        let step = match prompter.ask("> ") {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => match parse_command(&line) {
                Ok(SessionCommand::Add) => add_movie(prompter, &mut movies),
                Ok(SessionCommand::Remove(id)) => remove_movie(prompter, &mut movies, id),
                Ok(SessionCommand::List) => render_collection(prompter.output(), &movies),
                Ok(SessionCommand::Help) => prompter.say(HELP),
                Ok(SessionCommand::Quit) => break,
                Err(message) => prompter.say(message),
            },
            Err(err) => Err(err),
        };
        match step {
            Ok(()) => {}
            Err(CliError::InputClosed { .. }) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(movies)
}
