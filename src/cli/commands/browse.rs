//! Browse command implementation.

use super::{format_rating, mapping_options, open_library, open_preferences, truncate};
use crate::core::paginator::{PageCursor, Paginator};
use crate::models::config::Config;
use crate::models::movie::ListItem;
use crate::models::resource::ResultState;
use crate::services::catalog::TmdbClient;
use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Load `pages` pages of popular movies and print them.
pub async fn browse(config: &Config, pages: u32, format: &str) -> Result<()> {
    let library = open_library(config)?;
    let preferences = open_preferences(config)?;
    let options = mapping_options(config, &preferences);

    let client = TmdbClient::new(config.catalog.clone())?;
    let paginator = Paginator::with_max_pages(client, config.catalog.max_pages);

    let pb = ProgressBar::new(pages as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let mut cursor = PageCursor::start();
    let mut list: ResultState<Vec<ListItem>> = ResultState::default();
    for _ in 0..pages {
        pb.set_message(format!("page {}", cursor.page));
        let (next, result) = paginator.fetch_next_page(cursor, list, &options).await;
        cursor = next;
        list = result;
        pb.inc(1);
        if list.is_error() || !cursor.is_active() {
            break;
        }
    }
    pb.finish_and_clear();

    let failure = list.message().map(str::to_string);
    let mut movies = list.into_data().unwrap_or_default();
    library.overlay_flags(&mut movies);
    if !preferences.show_adult() {
        movies.retain(|m| !m.adult);
    }

    let sponsored: Vec<ListItem> = library
        .sponsored()
        .into_iter()
        .map(|r| r.to_detail().summary())
        .collect();

    match format {
        "json" => print_json(&sponsored, &movies)?,
        _ => print_table(&sponsored, &movies),
    }

    if let Some(message) = failure {
        eprintln!("{} {}", "[WARN]".yellow(), message);
    }
    if !cursor.is_active() {
        println!("{}", "You have reached the end of the list.".dimmed());
    }

    Ok(())
}

fn print_json(sponsored: &[ListItem], movies: &[ListItem]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        sponsored: &'a [ListItem],
        movies: &'a [ListItem],
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOutput { sponsored, movies })?
    );
    Ok(())
}

fn print_table(sponsored: &[ListItem], movies: &[ListItem]) {
    if !sponsored.is_empty() {
        println!("{}", "Sponsored".bold().magenta());
        for movie in sponsored {
            print_row(movie);
        }
        println!();
    }

    if movies.is_empty() {
        println!("No movies found.");
        return;
    }

    println!(
        "{:<9} {:<40} {:<12} {:<14} {}",
        "ID".bold(),
        "Title".bold(),
        "Released".bold(),
        "Rating".bold(),
        "Genres".bold()
    );
    println!("{}", "-".repeat(100));

    for movie in movies {
        print_row(movie);
    }

    println!();
    println!("{} movies", movies.len());
}

fn print_row(movie: &ListItem) {
    let mut marks = String::new();
    if movie.favorite {
        marks.push('★');
    }
    if movie.watched {
        marks.push('✓');
    }

    let title = truncate(&movie.title, 38);
    let title = if marks.is_empty() {
        title
    } else {
        format!("{} {}", title, marks)
    };

    println!(
        "{:<9} {:<40} {:<12} {:<14} {}",
        movie.id,
        title,
        movie.release_date,
        format_rating(movie.vote_average, movie.vote_count),
        movie.genres.join(", ")
    );
}
