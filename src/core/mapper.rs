//! Conversion of raw catalog records into list and detail items.
//!
//! Every conversion returns a [`ResultState`]. Upstream errors pass through
//! with their message; a page that cannot be converted as a whole becomes an
//! error without partial data. Individual bad fields never fail a record:
//! unknown genre codes become "Unknown", unparseable dates become empty
//! strings, missing images become empty URLs.

use crate::core::lookup;
use crate::models::movie::{Collection, Company, DetailItem, ListItem};
use crate::models::resource::ResultState;
use crate::services::catalog::{
    image_url, RawCollection, RawCompany, RawDetail, RawMovie, RawPage, RawVideoList,
    YOUTUBE_WATCH_URL,
};
use crate::utils::dates::{parse_date, reformat_date, SOURCE_DATE_FORMAT};

/// Message for a listing page that could not be converted.
pub const LIST_MAPPING_FAILED: &str = "could not convert movie list";

/// Video site whose entries are kept as trailers.
const TRAILER_SITE: &str = "YouTube";

const POSTER_WIDTH: u32 = 500;
const BACKDROP_WIDTH: u32 = 780;
const LOGO_WIDTH: u32 = 200;

/// Settings shared by all conversions.
#[derive(Debug, Clone)]
pub struct MappingOptions {
    /// Image CDN base URL.
    pub image_base_url: String,
    /// Display format for release dates (e.g., `MM/dd/yyyy`).
    pub date_format: String,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            image_base_url: "https://image.tmdb.org/t/p/".to_string(),
            date_format: SOURCE_DATE_FORMAT.to_string(),
        }
    }
}

impl MappingOptions {
    fn image(&self, width: u32, path: Option<&str>) -> String {
        match path.map(str::trim) {
            Some(p) if !p.is_empty() => image_url(&self.image_base_url, width, p),
            _ => String::new(),
        }
    }

    fn display_date(&self, raw: Option<&str>) -> String {
        reformat_date(raw.unwrap_or_default(), SOURCE_DATE_FORMAT, &self.date_format)
    }
}

/// Convert one listing page.
pub fn map_list_page(raw: ResultState<RawPage>, options: &MappingOptions) -> ResultState<Vec<ListItem>> {
    match raw {
        ResultState::Error { message, .. } => ResultState::error(message),
        ResultState::Loading(_) => ResultState::Loading(None),
        ResultState::Success(page) => match page.results {
            Some(results) => {
                ResultState::Success(results.iter().map(|m| map_movie(m, options)).collect())
            }
            None => {
                tracing::warn!("Listing page {:?} has no results array", page.page);
                ResultState::error(LIST_MAPPING_FAILED)
            }
        },
    }
}

/// Convert a single listing entry.
pub fn map_movie(raw: &RawMovie, options: &MappingOptions) -> ListItem {
    let release = raw.release_date.as_deref();

    ListItem {
        id: raw.id,
        title: raw.title.clone().unwrap_or_default(),
        original_title: raw.original_title.clone().unwrap_or_default(),
        overview: raw.overview.clone().unwrap_or_default(),
        poster_url: options.image(POSTER_WIDTH, raw.poster_path.as_deref()),
        backdrop_url: options.image(BACKDROP_WIDTH, raw.backdrop_path.as_deref()),
        genres: lookup::genre_names(raw.genre_ids.as_deref().unwrap_or_default()),
        release_date: options.display_date(release),
        released_on: release.and_then(|d| parse_date(d, SOURCE_DATE_FORMAT)),
        original_language: lookup::language_name(raw.original_language.as_deref().unwrap_or_default()),
        vote_average: raw.vote_average.unwrap_or(0.0),
        vote_count: raw.vote_count.unwrap_or(0),
        popularity: raw.popularity.unwrap_or(0.0),
        favorite: false,
        watched: false,
        sponsored: false,
        adult: raw.adult.unwrap_or(true),
    }
}

/// Convert a movie's details together with its videos.
///
/// Both inputs must be successful. The first error found (details first) is
/// returned as is.
pub fn map_detail(
    raw_detail: ResultState<RawDetail>,
    raw_videos: ResultState<RawVideoList>,
    options: &MappingOptions,
) -> ResultState<DetailItem> {
    let detail = match raw_detail {
        ResultState::Success(detail) => detail,
        ResultState::Error { message, .. } => return ResultState::error(message),
        ResultState::Loading(_) => return ResultState::Loading(None),
    };
    let videos = match raw_videos {
        ResultState::Success(videos) => videos,
        ResultState::Error { message, .. } => return ResultState::error(message),
        ResultState::Loading(_) => return ResultState::Loading(None),
    };

    ResultState::Success(build_detail(detail, videos, options))
}

fn build_detail(raw: RawDetail, videos: RawVideoList, options: &MappingOptions) -> DetailItem {
    let release = raw.release_date.as_deref();

    let genres = raw
        .genres
        .unwrap_or_default()
        .into_iter()
        .map(|g| g.name.unwrap_or_else(|| lookup::genre_name(g.id).to_string()))
        .collect();

    let production_companies = raw
        .production_companies
        .unwrap_or_default()
        .iter()
        .map(|c| map_company(c, options))
        .collect();

    let production_countries = raw
        .production_countries
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.name.filter(|n| !n.is_empty()).unwrap_or(c.iso_3166_1))
        .collect();

    let spoken_languages = raw
        .spoken_languages
        .unwrap_or_default()
        .into_iter()
        .map(|l| {
            l.english_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| lookup::language_name(&l.iso_639_1))
        })
        .collect();

    DetailItem {
        id: raw.id,
        title: raw.title.unwrap_or_default(),
        original_title: raw.original_title.unwrap_or_default(),
        overview: raw.overview.unwrap_or_default(),
        poster_url: options.image(POSTER_WIDTH, raw.poster_path.as_deref()),
        backdrop_url: options.image(BACKDROP_WIDTH, raw.backdrop_path.as_deref()),
        genres,
        release_date: options.display_date(release),
        released_on: release.and_then(|d| parse_date(d, SOURCE_DATE_FORMAT)),
        original_language: lookup::language_name(raw.original_language.as_deref().unwrap_or_default()),
        vote_average: raw.vote_average.unwrap_or(0.0),
        vote_count: raw.vote_count.unwrap_or(0),
        popularity: raw.popularity.unwrap_or(0.0),
        favorite: false,
        watched: false,
        sponsored: false,
        adult: raw.adult.unwrap_or(true),
        budget: raw.budget.unwrap_or(0),
        revenue: raw.revenue.unwrap_or(0),
        runtime: raw.runtime.unwrap_or(0),
        production_companies,
        production_countries,
        spoken_languages,
        tagline: raw.tagline.unwrap_or_default(),
        homepage: raw.homepage.unwrap_or_default(),
        imdb_id: raw.imdb_id.unwrap_or_default(),
        status: raw.status.unwrap_or_default(),
        collection: raw
            .belongs_to_collection
            .as_ref()
            .map(|c| map_collection(c, options))
            .unwrap_or_default(),
        videos: trailer_urls(videos),
    }
}

fn map_collection(raw: &RawCollection, options: &MappingOptions) -> Collection {
    Collection {
        id: raw.id,
        name: raw.name.clone().unwrap_or_default(),
        poster_url: options.image(POSTER_WIDTH, raw.poster_path.as_deref()),
        backdrop_url: options.image(BACKDROP_WIDTH, raw.backdrop_path.as_deref()),
    }
}

fn map_company(raw: &RawCompany, options: &MappingOptions) -> Company {
    Company {
        name: raw.name.clone().unwrap_or_default(),
        logo_url: options.image(LOGO_WIDTH, raw.logo_path.as_deref()),
    }
}

/// Playable URLs for the YouTube entries of a video list.
pub fn trailer_urls(videos: RawVideoList) -> Vec<String> {
    videos
        .results
        .unwrap_or_default()
        .into_iter()
        .filter(|v| v.site.as_deref() == Some(TRAILER_SITE))
        .filter_map(|v| v.key.filter(|k| !k.is_empty()))
        .map(|key| format!("{}{}", YOUTUBE_WATCH_URL, key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::RawVideo;

    fn video(site: &str, key: &str) -> RawVideo {
        RawVideo {
            key: Some(key.to_string()),
            name: Some("Trailer".to_string()),
            site: Some(site.to_string()),
            video_type: Some("Trailer".to_string()),
        }
    }

    #[test]
    fn test_map_movie_defaults() {
        let movie = map_movie(&RawMovie { id: 1, ..Default::default() }, &MappingOptions::default());

        assert_eq!(movie.id, 1);
        assert_eq!(movie.title, "");
        assert_eq!(movie.poster_url, "");
        assert_eq!(movie.release_date, "");
        assert!(movie.released_on.is_none());
        assert_eq!(movie.vote_count, 0);
        assert_eq!(movie.vote_average, 0.0);
        assert!(movie.adult);
        assert!(!movie.favorite);
    }

    #[test]
    fn test_trailer_urls_keep_youtube_only() {
        let videos = RawVideoList {
            id: Some(603),
            results: Some(vec![
                video("YouTube", "vKQi3bBA1y8"),
                video("Vimeo", "12345"),
                video("youtube", "lowercase"),
                video("YouTube", ""),
            ]),
        };

        assert_eq!(
            trailer_urls(videos),
            vec!["https://www.youtube.com/watch?v=vKQi3bBA1y8".to_string()]
        );
    }

    #[test]
    fn test_blank_image_path_is_empty_url() {
        let options = MappingOptions::default();
        assert_eq!(options.image(500, Some("  ")), "");
        assert_eq!(options.image(500, None), "");
    }
}
