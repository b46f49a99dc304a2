//! In-memory `CatalogApi` used by tests
//!
//! Clones share the same store, so a test can keep a handle while
//! the `App` owns another one.

use super::{ApiError, ApiResult, CatalogApi, DependentRef};
use crate::types::{Calidad, Clasificacion, Tematica, Video};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Store {
    tematicas: Vec<Tematica>,
    videos: Vec<Video>,
    next_id: u64,
    failures: Vec<(String, ApiError)>,
    calls: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryApi {
    store: Rc<RefCell<Store>>,
}

impl MemoryApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.store.borrow_mut().next_id = 1;
        api
    }

    /// Two temáticas, the first one referenced by a video
    pub fn seeded() -> Self {
        let api = Self::new();
        api.insert_tematica(tematica("Deportes"));
        api.insert_tematica(tematica("Cocina"));
        api.insert_video(video("Final del mundial", 1));
        api
    }

    pub fn insert_tematica(&self, mut tematica: Tematica) -> u64 {
        let mut store = self.store.borrow_mut();
        let id = store.take_id();
        tematica.id = Some(id);
        store.tematicas.push(tematica);
        id
    }

    pub fn insert_video(&self, mut video: Video) -> u64 {
        let mut store = self.store.borrow_mut();
        let id = store.take_id();
        video.id = Some(id);
        store.videos.push(video);
        id
    }

    /// Make the next call fail with `error`
    pub fn fail_next(&self, error: ApiError) {
        self.fail_on("", error);
    }

    /// Make the next call starting with `prefix` fail with `error`
    pub fn fail_on(&self, prefix: &str, error: ApiError) {
        self.store
            .borrow_mut()
            .failures
            .push((prefix.to_string(), error));
    }

    pub fn tematicas(&self) -> Vec<Tematica> {
        self.store.borrow().tematicas.clone()
    }

    pub fn videos(&self) -> Vec<Video> {
        self.store.borrow().videos.clone()
    }

    /// Calls issued so far, as `METHOD path`
    pub fn calls(&self) -> Vec<String> {
        self.store.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.store.borrow_mut().calls.clear();
    }

    fn record(&self, call: String) -> ApiResult<()> {
        let mut store = self.store.borrow_mut();
        let failure = store
            .failures
            .iter()
            .position(|(prefix, _)| call.starts_with(prefix.as_str()));
        store.calls.push(call);
        match failure {
            Some(pos) => Err(store.failures.remove(pos).1),
            None => Ok(()),
        }
    }
}

impl Store {
    fn take_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }
}

fn not_found(kind: &str, id: u64) -> ApiError {
    ApiError::NotFound(format!("{} {}", kind, id))
}

impl CatalogApi for MemoryApi {
    fn base_url(&self) -> &str {
        "memory://"
    }

    fn list_tematicas(&self) -> ApiResult<Vec<Tematica>> {
        self.record("GET /api/tematicas".into())?;
        Ok(self.tematicas())
    }

    fn get_tematica(&self, id: u64) -> ApiResult<Tematica> {
        self.record(format!("GET /api/tematicas/{}", id))?;
        self.tematicas()
            .into_iter()
            .find(|t| t.id == Some(id))
            .ok_or_else(|| not_found("tematica", id))
    }

    fn create_tematica(&self, tematica: &Tematica) -> ApiResult<Tematica> {
        self.record("POST /api/tematicas".into())?;
        let id = self.insert_tematica(tematica.clone());
        Ok(Tematica {
            id: Some(id),
            ..tematica.clone()
        })
    }

    fn update_tematica(&self, id: u64, tematica: &Tematica) -> ApiResult<Tematica> {
        self.record(format!("PUT /api/tematicas/{}", id))?;
        let mut store = self.store.borrow_mut();
        let slot = store
            .tematicas
            .iter_mut()
            .find(|t| t.id == Some(id))
            .ok_or_else(|| not_found("tematica", id))?;
        *slot = Tematica {
            id: Some(id),
            ..tematica.clone()
        };
        Ok(slot.clone())
    }

    fn delete_tematica(&self, id: u64) -> ApiResult<()> {
        self.record(format!("DELETE /api/tematicas/{}", id))?;
        let mut store = self.store.borrow_mut();
        let before = store.tematicas.len();
        store.tematicas.retain(|t| t.id != Some(id));
        if store.tematicas.len() == before {
            return Err(not_found("tematica", id));
        }
        Ok(())
    }

    fn list_videos(&self) -> ApiResult<Vec<Video>> {
        self.record("GET /api/videos".into())?;
        Ok(self.videos())
    }

    fn videos_by_tematica(&self, tematica_id: u64) -> ApiResult<Vec<DependentRef>> {
        self.record(format!("GET /api/videos?tematicaId={}", tematica_id))?;
        Ok(self
            .videos()
            .into_iter()
            .filter(|v| v.tematica_id == tematica_id)
            .map(|v| DependentRef { id: v.id })
            .collect())
    }

    fn get_video(&self, id: u64) -> ApiResult<Video> {
        self.record(format!("GET /api/videos/{}", id))?;
        self.videos()
            .into_iter()
            .find(|v| v.id == Some(id))
            .ok_or_else(|| not_found("video", id))
    }

    fn create_video(&self, video: &Video) -> ApiResult<Video> {
        self.record("POST /api/videos".into())?;
        let id = self.insert_video(video.clone());
        Ok(Video {
            id: Some(id),
            ..video.clone()
        })
    }

    fn update_video(&self, id: u64, video: &Video) -> ApiResult<Video> {
        self.record(format!("PUT /api/videos/{}", id))?;
        let mut store = self.store.borrow_mut();
        let slot = store
            .videos
            .iter_mut()
            .find(|v| v.id == Some(id))
            .ok_or_else(|| not_found("video", id))?;
        *slot = Video {
            id: Some(id),
            ..video.clone()
        };
        Ok(slot.clone())
    }

    fn delete_video(&self, id: u64) -> ApiResult<()> {
        self.record(format!("DELETE /api/videos/{}", id))?;
        let mut store = self.store.borrow_mut();
        let before = store.videos.len();
        store.videos.retain(|v| v.id != Some(id));
        if store.videos.len() == before {
            return Err(not_found("video", id));
        }
        Ok(())
    }
}

/// Sample temática without id
pub fn tematica(nombre: &str) -> Tematica {
    Tematica {
        id: None,
        nombre: nombre.into(),
        descripcion: format!("Videos de {}", nombre.to_lowercase()),
        popularidad: 5.0,
        activo: true,
        fecha_creacion: NaiveDate::from_ymd_opt(2022, 6, 1),
    }
}

/// Sample video without id
pub fn video(titulo: &str, tematica_id: u64) -> Video {
    Video {
        id: None,
        titulo: titulo.into(),
        autor: "Autor".into(),
        duracion: 90.0,
        calidad: Calidad::P720,
        clasificacion: Clasificacion::TodosLosPublicos,
        fecha_creacion: NaiveDate::from_ymd_opt(2022, 6, 2),
        tematica_id,
    }
}
