//! Detail command implementation.

use super::{format_rating, mapping_options, open_library, open_preferences};
use crate::core::details::load_detail;
use crate::models::config::Config;
use crate::models::local::LocalRecord;
use crate::models::movie::DetailItem;
use crate::models::resource::ResultState;
use crate::services::catalog::TmdbClient;
use anyhow::{bail, Result};
use colored::Colorize;

/// Fetch and print a movie, optionally saving it as a favorite.
pub async fn show_detail(config: &Config, id: i64, save: bool) -> Result<()> {
    let mut library = open_library(config)?;
    let preferences = open_preferences(config)?;
    let options = mapping_options(config, &preferences);

    let client = TmdbClient::new(config.catalog.clone())?;

    let mut detail = match load_detail(&client, id, &options).await {
        ResultState::Success(detail) => detail,
        ResultState::Error { message, .. } => bail!("Could not load movie {}: {}", id, message),
        ResultState::Loading(_) => bail!("Movie {} is still loading", id),
    };

    if let Some(record) = library.query_one(id) {
        detail.favorite = record.favorite;
        detail.watched = record.watched;
    }

    print_detail(&detail);
    if let Some(record) = library.query_one(id) {
        if !record.note.is_empty() {
            println!("{} {}", "Note:".bold(), record.note);
        }
    }

    if save {
        let mut record = LocalRecord::from_detail(&detail);
        record.favorite = true;
        library.upsert(record)?;
        println!();
        println!("{} Saved to library", "[OK]".green());
    }

    Ok(())
}

/// Print a detail record.
pub(crate) fn print_detail(detail: &DetailItem) {
    let mut heading = format!("{} ({})", detail.title, detail.id);
    if detail.favorite {
        heading.push_str(" ★");
    }
    if detail.watched {
        heading.push_str(" ✓");
    }
    println!("{}", heading.bold().cyan());

    if !detail.original_title.is_empty() && detail.original_title != detail.title {
        println!("  {}", detail.original_title.dimmed());
    }
    if !detail.tagline.is_empty() {
        println!("  {}", detail.tagline.italic());
    }
    println!();

    let field = |name: &str, value: String| {
        if !value.is_empty() {
            println!("{:<14} {}", format!("{}:", name).bold(), value);
        }
    };

    field("Released", detail.release_date.clone());
    field("Status", detail.status.clone());
    if detail.runtime > 0 {
        field("Runtime", format!("{} min", detail.runtime));
    }
    field("Rating", format_rating(detail.vote_average, detail.vote_count));
    field("Genres", detail.genres.join(", "));
    field("Language", detail.original_language.clone());
    field("Spoken", detail.spoken_languages.join(", "));
    field("Countries", detail.production_countries.join(", "));
    field(
        "Companies",
        detail
            .production_companies
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    );
    if detail.budget > 0 {
        field("Budget", format!("${}", detail.budget));
    }
    if detail.revenue > 0 {
        field("Revenue", format!("${}", detail.revenue));
    }
    if !detail.collection.is_empty() {
        field("Collection", detail.collection.name.clone());
    }
    field("Homepage", detail.homepage.clone());
    field("IMDB", detail.imdb_id.clone());
    field("Poster", detail.poster_url.clone());

    if !detail.overview.is_empty() {
        println!();
        println!("{}", detail.overview);
    }

    if !detail.videos.is_empty() {
        println!();
        println!("{}", "Trailers".bold());
        for url in &detail.videos {
            println!("  {}", url);
        }
    }
}
