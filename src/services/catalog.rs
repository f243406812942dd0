//! TMDB catalog client.

use crate::models::config::CatalogConfig;
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Base URL for playable trailer links.
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// One page of the movie listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPage {
    pub page: Option<u32>,
    pub results: Option<Vec<RawMovie>>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u32>,
}

/// Movie entry inside a listing page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovie {
    pub id: i64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genre_ids: Option<Vec<i64>>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub popularity: Option<f64>,
    pub adult: Option<bool>,
}

/// Movie details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDetail {
    pub id: i64,
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub homepage: Option<String>,
    pub status: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub popularity: Option<f64>,
    pub adult: Option<bool>,
    pub genres: Option<Vec<RawGenre>>,
    pub belongs_to_collection: Option<RawCollection>,
    pub production_companies: Option<Vec<RawCompany>>,
    pub production_countries: Option<Vec<RawCountry>>,
    pub spoken_languages: Option<Vec<RawLanguage>>,
}

/// Genre.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGenre {
    pub id: i64,
    pub name: Option<String>,
}

/// Collection (franchise) reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCollection {
    pub id: i64,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// Production company.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCompany {
    pub id: i64,
    pub name: Option<String>,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
}

/// Production country.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
    pub iso_3166_1: String,
    pub name: Option<String>,
}

/// Spoken language.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLanguage {
    pub iso_639_1: String,
    pub english_name: Option<String>,
    pub name: Option<String>,
}

/// Videos attached to a movie.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideoList {
    pub id: Option<i64>,
    pub results: Option<Vec<RawVideo>>,
}

/// A single video (trailer, teaser, clip).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideo {
    pub key: Option<String>,
    pub name: Option<String>,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub video_type: Option<String>,
}

/// Remote source of movie listings, details and videos.
///
/// Pages are 1-indexed.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch one page of the movie listing.
    async fn list_movies(&self, page: u32) -> Result<RawPage>;

    /// Fetch details for a single movie.
    async fn movie_detail(&self, id: i64) -> Result<RawDetail>;

    /// Fetch the videos attached to a movie.
    async fn movie_videos(&self, id: i64) -> Result<RawVideoList>;
}

#[async_trait]
impl<T: CatalogService + ?Sized> CatalogService for std::sync::Arc<T> {
    async fn list_movies(&self, page: u32) -> Result<RawPage> {
        (**self).list_movies(page).await
    }

    async fn movie_detail(&self, id: i64) -> Result<RawDetail> {
        (**self).movie_detail(id).await
    }

    async fn movie_videos(&self, id: i64) -> Result<RawVideoList> {
        (**self).movie_videos(id).await
    }
}

/// Build an image URL: `base + "w" + width + path`.
pub fn image_url(base_url: &str, width: u32, path: &str) -> String {
    format!("{}w{}{}", base_url, width, path)
}

/// TMDB API client.
pub struct TmdbClient {
    config: CatalogConfig,
    api_key: String,
    /// Whether to use Bearer token authentication (API v4 style)
    use_bearer: bool,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(crate::Error::TmdbApiKeyMissing)?;

        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            api_key,
            use_bearer,
            client,
        })
    }

    /// Image CDN base URL.
    pub fn image_base_url(&self) -> &str {
        &self.config.image_base_url
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.api_key))
        } else {
            request
        }
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    fn build_url(&self, path: &str, extra_params: &str) -> String {
        let auth = if self.use_bearer {
            String::new()
        } else {
            format!("api_key={}&", urlencoding::encode(&self.api_key))
        };

        format!(
            "{}/{}?{}language={}&region={}{}",
            self.config.base_url,
            path,
            auth,
            urlencoding::encode(&self.config.language),
            urlencoding::encode(&self.config.region),
            extra_params
        )
    }

    /// Send a request and decode the JSON body, turning non-2xx into an error.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", redact(url));

        let response = self.build_request(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(crate::Error::CatalogApi {
                status: status.as_u16(),
                message: api_message(&message),
            });
        }

        Ok(response.json().await?)
    }

    /// Verify API key is valid.
    ///
    /// `Ok(false)` means the catalog rejected the key; a transport failure is
    /// returned as an error.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = if self.use_bearer {
            format!("{}/authentication", self.config.base_url)
        } else {
            format!(
                "{}/authentication?api_key={}",
                self.config.base_url,
                urlencoding::encode(&self.api_key)
            )
        };

        let response = self.build_request(&url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl CatalogService for TmdbClient {
    async fn list_movies(&self, page: u32) -> Result<RawPage> {
        let url = self.build_url("movie/popular", &format!("&page={}", page));
        self.get_json(&url).await
    }

    async fn movie_detail(&self, id: i64) -> Result<RawDetail> {
        let url = self.build_url(&format!("movie/{}", id), "");
        self.get_json(&url).await
    }

    async fn movie_videos(&self, id: i64) -> Result<RawVideoList> {
        let url = self.build_url(&format!("movie/{}/videos", id), "");
        self.get_json(&url).await
    }
}

/// Pull `status_message` out of a TMDB error body, falling back to the raw text.
fn api_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        status_message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.status_message)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Hide the api_key query parameter in logs.
fn redact(url: &str) -> String {
    match url.find("api_key=") {
        Some(start) => {
            let end = url[start..].find('&').map(|i| start + i).unwrap_or(url.len());
            format!("{}api_key=***{}", &url[..start], &url[end..])
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> CatalogConfig {
        CatalogConfig {
            api_key: Some(api_key.to_string()),
            region: "US".to_string(),
            language: "en-US".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/", 500, "/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn test_build_url_with_api_key() {
        let client = TmdbClient::new(config("secret")).unwrap();
        let url = client.build_url("movie/popular", "&page=2");
        assert_eq!(
            url,
            "https://api.themoviedb.org/3/movie/popular?api_key=secret&language=en-US&region=US&page=2"
        );
    }

    #[test]
    fn test_build_url_with_bearer_token() {
        let client = TmdbClient::new(config("eyJhbGciOiJIUzI1NiJ9.token")).unwrap();
        let url = client.build_url("movie/603", "");
        assert!(!url.contains("api_key"));
        assert!(url.ends_with("movie/603?language=en-US&region=US"));
    }

    #[test]
    fn test_missing_api_key() {
        let mut cfg = config("");
        assert!(matches!(
            TmdbClient::new(cfg.clone()),
            Err(crate::Error::TmdbApiKeyMissing)
        ));
        cfg.api_key = None;
        assert!(TmdbClient::new(cfg).is_err());
    }

    #[tokio::test]
    async fn test_verify_api_key_reports_unreachable_host() {
        let client = TmdbClient::new(CatalogConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 5,
            ..config("secret")
        })
        .unwrap();

        assert!(matches!(
            client.verify_api_key().await,
            Err(crate::Error::Http(_))
        ));
    }

    #[test]
    fn test_redact() {
        assert_eq!(
            redact("https://x/movie?api_key=secret&page=1"),
            "https://x/movie?api_key=***&page=1"
        );
        assert_eq!(redact("https://x/movie?api_key=secret"), "https://x/movie?api_key=***");
    }

    #[test]
    fn test_api_message() {
        assert_eq!(
            api_message(r#"{"status_code":7,"status_message":"Invalid API key"}"#),
            "Invalid API key"
        );
        assert_eq!(api_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_deserialize_page_with_missing_fields() {
        let page: RawPage = serde_json::from_str(
            r#"{"page":1,"results":[{"id":603,"title":"The Matrix","genre_ids":[28,878]}],"total_pages":500}"#,
        )
        .unwrap();
        let results = page.results.unwrap();
        assert_eq!(results[0].id, 603);
        assert!(results[0].adult.is_none());
        assert_eq!(page.total_pages, Some(500));
    }
}
