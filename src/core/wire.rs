//! Wire models for service-issued media identifiers.

use serde::Deserialize;

/// A map identifier plus access token, as returned by the map endpoint.
///
/// Combine with tile coordinates via [`crate::media::tile_url`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapId {
    /// The opaque map identifier.
    #[serde(rename = "mapid")]
    pub map_id: String,
    /// The access token authorizing tile fetches for this map.
    pub token: String,
}

/// A thumbnail identifier plus access token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThumbId {
    /// The opaque thumbnail identifier.
    #[serde(rename = "thumbid")]
    pub thumb_id: String,
    /// The access token authorizing the thumbnail fetch.
    pub token: String,
}

/// A download document identifier plus access token, shared by the image and table
/// download services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadId {
    /// The opaque document identifier.
    #[serde(rename = "docid")]
    pub doc_id: String,
    /// The access token authorizing the download.
    pub token: String,
}
