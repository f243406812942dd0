//! Single movie lookup.

use crate::core::mapper::{map_detail, MappingOptions};
use crate::models::movie::DetailItem;
use crate::models::resource::ResultState;
use crate::services::catalog::CatalogService;

/// Fetch a movie's details and videos concurrently and convert them.
///
/// Failures never escape as errors: they come back as `ResultState::Error`
/// carrying the upstream message.
pub async fn load_detail<S>(service: &S, id: i64, options: &MappingOptions) -> ResultState<DetailItem>
where
    S: CatalogService + ?Sized,
{
    tracing::debug!("Loading details for movie {}", id);

    let (detail, videos) = futures::join!(service.movie_detail(id), service.movie_videos(id));

    if let Err(ref e) = detail {
        tracing::warn!("Detail request for movie {} failed: {}", id, e);
    }
    if let Err(ref e) = videos {
        tracing::warn!("Video request for movie {} failed: {}", id, e);
    }

    map_detail(detail.into(), videos.into(), options)
}
