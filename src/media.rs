//! Client-side URL construction for tiles, thumbnails and downloads.
//!
//! These builders perform no HTTP; they combine a session's tile base URL with
//! identifiers issued by the service (see [`crate::core::wire`]).

use crate::core::{DownloadId, EeClient, MapId, ThumbId};

/// The URL of one map tile.
///
/// `x` wraps around the antimeridian: any integer is reduced into `[0, 2^z)`.
#[must_use]
pub fn tile_url(client: &EeClient, map_id: &MapId, x: i64, y: i64, z: u32) -> String {
    let width = 2_i64.saturating_pow(z);
    let x = x.rem_euclid(width);
    format!(
        "{}/map/{}/{z}/{x}/{y}?token={}",
        tile_base(client),
        map_id.map_id,
        map_id.token
    )
}

/// The URL from which a rendered thumbnail can be fetched.
#[must_use]
pub fn thumb_url(client: &EeClient, thumb_id: &ThumbId) -> String {
    format!(
        "{}/api/thumb?thumbid={}&token={}",
        tile_base(client),
        thumb_id.thumb_id,
        thumb_id.token
    )
}

/// The URL from which an image download can be fetched.
#[must_use]
pub fn download_url(client: &EeClient, download_id: &DownloadId) -> String {
    format!(
        "{}/api/download?docid={}&token={}",
        tile_base(client),
        download_id.doc_id,
        download_id.token
    )
}

/// The URL from which a table download can be fetched.
#[must_use]
pub fn table_download_url(client: &EeClient, download_id: &DownloadId) -> String {
    format!(
        "{}/api/table?docid={}&token={}",
        tile_base(client),
        download_id.doc_id,
        download_id.token
    )
}

fn tile_base(client: &EeClient) -> String {
    let base = client.tile_base();
    base.as_str().trim_end_matches('/').to_string()
}
