//! On-device record for favorited, watched and sponsored movies.

use super::movie::{Collection, Company, DetailItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Separator used to flatten list fields for storage.
pub const LIST_DELIMITER: char = '|';

/// Persisted projection of a [`DetailItem`].
///
/// List fields are flattened to `|`-delimited strings. Collection and video
/// data are not stored: a record read back through [`LocalRecord::to_detail`]
/// has an empty collection and no videos. Company logos are dropped as well,
/// only the names survive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalRecord {
    pub id: i64,
    pub title: String,
    pub original_title: String,
    pub overview: String,
    pub poster_url: String,
    pub backdrop_url: String,
    /// Genre names, `|`-delimited.
    pub genres: String,
    pub release_date: String,
    pub released_on: Option<NaiveDate>,
    pub original_language: String,
    pub vote_average: f64,
    pub vote_count: u32,
    pub popularity: f64,
    pub adult: bool,
    pub budget: u64,
    pub revenue: u64,
    pub runtime: u32,
    /// Company names, `|`-delimited.
    pub production_companies: String,
    /// Country names, `|`-delimited.
    pub production_countries: String,
    /// Language names, `|`-delimited.
    pub spoken_languages: String,
    pub tagline: String,
    pub homepage: String,
    pub imdb_id: String,
    pub status: String,
    pub favorite: bool,
    pub watched: bool,
    pub sponsored: bool,
    /// Personal note.
    #[serde(default)]
    pub note: String,
    /// When the record was last written (RFC 3339).
    #[serde(default)]
    pub saved_at: String,
}

impl LocalRecord {
    /// Flatten a detail record for storage.
    pub fn from_detail(detail: &DetailItem) -> Self {
        Self {
            id: detail.id,
            title: detail.title.clone(),
            original_title: detail.original_title.clone(),
            overview: detail.overview.clone(),
            poster_url: detail.poster_url.clone(),
            backdrop_url: detail.backdrop_url.clone(),
            genres: join_list(detail.genres.iter()),
            release_date: detail.release_date.clone(),
            released_on: detail.released_on,
            original_language: detail.original_language.clone(),
            vote_average: detail.vote_average,
            vote_count: detail.vote_count,
            popularity: detail.popularity,
            adult: detail.adult,
            budget: detail.budget,
            revenue: detail.revenue,
            runtime: detail.runtime,
            production_companies: join_list(detail.production_companies.iter().map(|c| &c.name)),
            production_countries: join_list(detail.production_countries.iter()),
            spoken_languages: join_list(detail.spoken_languages.iter()),
            tagline: detail.tagline.clone(),
            homepage: detail.homepage.clone(),
            imdb_id: detail.imdb_id.clone(),
            status: detail.status.clone(),
            favorite: detail.favorite,
            watched: detail.watched,
            sponsored: detail.sponsored,
            note: String::new(),
            saved_at: String::new(),
        }
    }

    /// Rebuild a detail record. Collection and videos come back empty.
    pub fn to_detail(&self) -> DetailItem {
        DetailItem {
            id: self.id,
            title: self.title.clone(),
            original_title: self.original_title.clone(),
            overview: self.overview.clone(),
            poster_url: self.poster_url.clone(),
            backdrop_url: self.backdrop_url.clone(),
            genres: split_list(&self.genres),
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
            budget: self.budget,
            revenue: self.revenue,
            runtime: self.runtime,
            production_companies: split_list(&self.production_companies)
                .into_iter()
                .map(|name| Company {
                    name,
                    logo_url: String::new(),
                })
                .collect(),
            production_countries: split_list(&self.production_countries),
            spoken_languages: split_list(&self.spoken_languages),
            tagline: self.tagline.clone(),
            homepage: self.homepage.clone(),
            imdb_id: self.imdb_id.clone(),
            status: self.status.clone(),
            collection: Collection::default(),
            videos: Vec::new(),
        }
    }

    /// Genre names as a list.
    pub fn genre_list(&self) -> Vec<String> {
        split_list(&self.genres)
    }
}

/// Join values with [`LIST_DELIMITER`], dropping the delimiter from values.
pub fn join_list<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    values
        .into_iter()
        .map(|v| v.replace(LIST_DELIMITER, " "))
        .collect::<Vec<_>>()
        .join(&LIST_DELIMITER.to_string())
}

/// Split a delimited string, skipping blank entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_and_split_list() {
        let genres = vec!["Action".to_string(), "Science Fiction".to_string()];
        let joined = join_list(genres.iter());
        assert_eq!(joined, "Action|Science Fiction");
        assert_eq!(split_list(&joined), genres);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_join_strips_delimiter_from_values() {
        let values = vec!["A|B".to_string()];
        assert_eq!(join_list(values.iter()), "A B");
    }

    #[test]
    fn test_round_trip_drops_collection_and_videos() {
        let detail = DetailItem {
            id: 120,
            title: "The Fellowship of the Ring".to_string(),
            genres: vec!["Adventure".to_string(), "Fantasy".to_string()],
            production_companies: vec![Company {
                name: "New Line Cinema".to_string(),
                logo_url: "https://image.tmdb.org/t/p/w200/logo.png".to_string(),
            }],
            budget: 93_000_000,
            collection: Collection {
                id: 119,
                name: "The Lord of the Rings Collection".to_string(),
                ..Default::default()
            },
            videos: vec!["https://www.youtube.com/watch?v=V75dMMIW2B4".to_string()],
            ..Default::default()
        };

        let restored = LocalRecord::from_detail(&detail).to_detail();
        assert_eq!(restored.id, 120);
        assert_eq!(restored.genres, detail.genres);
        assert_eq!(restored.budget, 93_000_000);
        assert_eq!(restored.production_companies[0].name, "New Line Cinema");
        assert!(restored.production_companies[0].logo_url.is_empty());
        assert!(restored.collection.is_empty());
        assert!(restored.videos.is_empty());
    }
}
