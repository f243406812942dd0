//! Library command implementation.

use super::detail::print_detail;
use super::{format_rating, open_library, open_preferences, truncate};
use crate::cli::args::LibraryAction;
use crate::core::library::Library;
use crate::models::config::Config;
use crate::models::local::{join_list, LocalRecord};
use crate::utils::dates::{format_date, parse_date, SOURCE_DATE_FORMAT};
use anyhow::{bail, Result};
use colored::Colorize;

/// Execute library subcommand.
pub async fn execute_library(config: &Config, action: LibraryAction) -> Result<()> {
    let mut library = open_library(config)?;

    match action {
        LibraryAction::List { filter } => list(&library, &filter),
        LibraryAction::Show { id } => show(&library, id),
        LibraryAction::Remove { id } => {
            if library.delete(id)? {
                println!("{} Removed movie {}", "[OK]".green(), id);
            } else {
                println!("Movie {} was not in the library.", id);
            }
            Ok(())
        }
        LibraryAction::Note { id, text } => {
            library.set_note(id, &text)?;
            println!("{} Note saved for movie {}", "[OK]".green(), id);
            Ok(())
        }
        LibraryAction::Watched { id, unset } => {
            library.set_watched(id, !unset)?;
            let state = if unset { "unwatched" } else { "watched" };
            println!("{} Movie {} marked as {}", "[OK]".green(), id, state);
            Ok(())
        }
        LibraryAction::Sponsor {
            title,
            overview,
            release_date,
            genres,
            poster_url,
        } => {
            let date_format = open_preferences(config)?.date_format();
            let record = sponsored_record(
                &library,
                &title,
                &overview,
                release_date.as_deref(),
                &genres,
                &poster_url,
                &date_format,
            )?;
            let id = record.id;
            library.insert(record)?;
            println!("{} Added sponsored movie \"{}\" as {}", "[OK]".green(), title, id);
            Ok(())
        }
    }
}

/// Build a record for a producer-added movie.
fn sponsored_record(
    library: &Library,
    title: &str,
    overview: &str,
    release_date: Option<&str>,
    genres: &[String],
    poster_url: &str,
    date_format: &str,
) -> Result<LocalRecord> {
    let title = title.trim();
    if title.is_empty() {
        bail!("A sponsored movie needs a title");
    }

    let released_on = match release_date {
        Some(raw) => match parse_date(raw, SOURCE_DATE_FORMAT) {
            Some(date) => Some(date),
            None => bail!("Invalid release date '{}', expected YYYY-MM-DD", raw),
        },
        None => None,
    };

    let genres: Vec<String> = genres
        .iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();

    Ok(LocalRecord {
        id: library.next_sponsored_id(),
        title: title.to_string(),
        original_title: title.to_string(),
        overview: overview.trim().to_string(),
        poster_url: poster_url.trim().to_string(),
        genres: join_list(genres.iter()),
        release_date: released_on
            .map(|d| format_date(d, date_format))
            .unwrap_or_default(),
        released_on,
        adult: false,
        sponsored: true,
        ..Default::default()
    })
}

fn list(library: &Library, filter: &str) -> Result<()> {
    let records = match filter {
        "all" => library.query_all(),
        "favorites" => library.favorites(),
        "watched" => library.watched(),
        "sponsored" => library.sponsored(),
        other => bail!(
            "Unknown filter '{}', expected all, favorites, watched or sponsored",
            other
        ),
    };

    println!("{}", "Library".bold().cyan());
    println!();

    if records.is_empty() {
        println!("No movies found.");
        return Ok(());
    }

    println!(
        "{:<9} {:<40} {:<12} {:<14} {}",
        "ID".bold(),
        "Title".bold(),
        "Released".bold(),
        "Rating".bold(),
        "Flags".bold()
    );
    println!("{}", "-".repeat(90));

    for record in &records {
        println!(
            "{:<9} {:<40} {:<12} {:<14} {}",
            record.id,
            truncate(&record.title, 38),
            record.release_date,
            format_rating(record.vote_average, record.vote_count),
            flags(record)
        );
    }

    println!();
    println!("{} movies", records.len());
    Ok(())
}

fn show(library: &Library, id: i64) -> Result<()> {
    let Some(record) = library.query_one(id) else {
        bail!("Movie {} is not in the library", id);
    };

    print_detail(&record.to_detail());
    if !record.note.is_empty() {
        println!();
        println!("{} {}", "Note:".bold(), record.note);
    }
    if !record.saved_at.is_empty() {
        println!("{} {}", "Saved:".bold(), record.saved_at.dimmed());
    }
    Ok(())
}

fn flags(record: &LocalRecord) -> String {
    let mut flags = Vec::new();
    if record.favorite {
        flags.push("favorite");
    }
    if record.watched {
        flags.push("watched");
    }
    if record.sponsored {
        flags.push("sponsored");
    }
    if !record.note.is_empty() {
        flags.push("note");
    }
    flags.join(", ")
}
