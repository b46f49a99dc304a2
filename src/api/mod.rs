//! REST API layer
//!
//! This module handles all communication with the backing service:
//! - The `CatalogApi` seam used by the views
//! - The blocking HTTP implementation
//! - Error taxonomy for failed requests

pub mod client;
pub mod error;
#[cfg(test)]
pub mod memory;

pub use client::HttpApi;
pub use error::{ApiError, ApiResult};

use crate::types::{Tematica, Video};
use serde::Deserialize;

/// A record returned by the dependency check.
///
/// The endpoint may answer with partial objects, so only `id` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependentRef {
    #[serde(default)]
    pub id: Option<u64>,
}

/// Operations the views need from the API
pub trait CatalogApi {
    /// Base URL shown in the header
    fn base_url(&self) -> &str;

    fn list_tematicas(&self) -> ApiResult<Vec<Tematica>>;
    fn get_tematica(&self, id: u64) -> ApiResult<Tematica>;
    fn create_tematica(&self, tematica: &Tematica) -> ApiResult<Tematica>;
    fn update_tematica(&self, id: u64, tematica: &Tematica) -> ApiResult<Tematica>;
    fn delete_tematica(&self, id: u64) -> ApiResult<()>;

    fn list_videos(&self) -> ApiResult<Vec<Video>>;
    /// Videos that reference a temática (`GET /api/videos?tematicaId=`)
    fn videos_by_tematica(&self, tematica_id: u64) -> ApiResult<Vec<DependentRef>>;
    fn get_video(&self, id: u64) -> ApiResult<Video>;
    fn create_video(&self, video: &Video) -> ApiResult<Video>;
    fn update_video(&self, id: u64, video: &Video) -> ApiResult<Video>;
    fn delete_video(&self, id: u64) -> ApiResult<()>;
}
