//! Static code tables for genres and languages.

/// Name used for genre codes missing from the table.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// TMDB movie genre codes.
const GENRES: &[(i64, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// ISO 639-1 codes commonly seen in the catalog.
const LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("cn", "Cantonese"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ml", "Malayalam"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sv", "Swedish"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Tagalog"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

/// Resolve a genre code to its name.
pub fn genre_name(id: i64) -> &'static str {
    GENRES
        .iter()
        .find(|(code, _)| *code == id)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_GENRE)
}

/// Resolve a list of genre codes, one name per code.
pub fn genre_names(ids: &[i64]) -> Vec<String> {
    ids.iter().map(|id| genre_name(*id).to_string()).collect()
}

/// Resolve a language code to its English name, or return the code itself.
pub fn language_name(code: &str) -> String {
    let lower = code.trim().to_lowercase();
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == lower)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.trim().to_string())
}
