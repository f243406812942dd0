//! Normalized movie records produced by the mapping layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary record shown in paginated lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// TMDB ID (negative for sponsored entries).
    pub id: i64,
    /// Localized title.
    pub title: String,
    /// Original title.
    pub original_title: String,
    /// Overview/synopsis.
    pub overview: String,
    /// Poster URL, empty when the movie has none.
    pub poster_url: String,
    /// Backdrop URL, empty when the movie has none.
    pub backdrop_url: String,
    /// Genre names.
    pub genres: Vec<String>,
    /// Release date in the user's display format.
    pub release_date: String,
    /// Parsed release date, used for ordering.
    pub released_on: Option<NaiveDate>,
    /// Original language name.
    pub original_language: String,
    /// User rating (0-10).
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Popularity score.
    pub popularity: f64,
    pub favorite: bool,
    pub watched: bool,
    pub sponsored: bool,
    pub adult: bool,
}

/// Full record for a single movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    pub id: i64,
    pub title: String,
    pub original_title: String,
    pub overview: String,
    pub poster_url: String,
    pub backdrop_url: String,
    pub genres: Vec<String>,
    pub release_date: String,
    pub released_on: Option<NaiveDate>,
    pub original_language: String,
    pub vote_average: f64,
    pub vote_count: u32,
    pub popularity: f64,
    pub favorite: bool,
    pub watched: bool,
    pub sponsored: bool,
    pub adult: bool,
    /// Budget in USD.
    pub budget: u64,
    /// Revenue in USD.
    pub revenue: u64,
    /// Runtime in minutes.
    pub runtime: u32,
    /// Production companies.
    pub production_companies: Vec<Company>,
    /// Production country names.
    pub production_countries: Vec<String>,
    /// Spoken language names.
    pub spoken_languages: Vec<String>,
    pub tagline: String,
    pub homepage: String,
    /// IMDB ID, empty when unknown.
    pub imdb_id: String,
    /// Release status (e.g., "Released").
    pub status: String,
    /// Franchise the movie belongs to.
    pub collection: Collection,
    /// Playable trailer URLs.
    pub videos: Vec<String>,
}

/// Production company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    /// Logo URL, empty when unavailable.
    pub logo_url: String,
}

/// Franchise grouping (e.g., "The Lord of the Rings Collection").
///
/// An id of 0 means the movie belongs to no collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub poster_url: String,
    pub backdrop_url: String,
}

impl Collection {
    pub fn is_empty(&self) -> bool {
        self.id == 0 && self.name.is_empty()
    }
}

impl DetailItem {
    /// Project the detail down to its list summary.
    pub fn summary(&self) -> ListItem {
        ListItem {
            id: self.id,
            title: self.title.clone(),
            original_title: self.original_title.clone(),
            overview: self.overview.clone(),
            poster_url: self.poster_url.clone(),
            backdrop_url: self.backdrop_url.clone(),
            genres: self.genres.clone(),
            release_date: self.release_date.clone(),
            released_on: self.released_on,
            original_language: self.original_language.clone(),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            popularity: self.popularity,
            favorite: self.favorite,
            watched: self.watched,
            sponsored: self.sponsored,
            adult: self.adult,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keeps_identity_and_flags() {
        let detail = DetailItem {
            id: 603,
            title: "The Matrix".to_string(),
            genres: vec!["Action".to_string()],
            favorite: true,
            budget: 63_000_000,
            ..Default::default()
        };

        let summary = detail.summary();
        assert_eq!(summary.id, 603);
        assert_eq!(summary.title, "The Matrix");
        assert_eq!(summary.genres, vec!["Action".to_string()]);
        assert!(summary.favorite);
    }

    #[test]
    fn test_collection_is_empty() {
        assert!(Collection::default().is_empty());
        let collection = Collection {
            id: 2344,
            name: "The Matrix Collection".to_string(),
            ..Default::default()
        };
        assert!(!collection.is_empty());
    }
}
