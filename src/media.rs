use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::MediaRef;

/// A file picked by the user, not yet stored anywhere.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Persists media bytes and hands back a stable reference.
pub trait MediaStore: Send + Sync {
    fn store(&self, upload: MediaUpload) -> AppResult<MediaRef>;

    fn fetch(&self, url: &str) -> AppResult<Option<Vec<u8>>>;
}

/// Keeps uploads in process memory under `media://<uuid>/<file name>` urls.
#[derive(Debug, Default)]
pub struct InMemoryMediaStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        match self.objects.lock() {
            Ok(objects) => objects.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MediaStore for InMemoryMediaStore {
    fn store(&self, upload: MediaUpload) -> AppResult<MediaRef> {
        if upload.bytes.is_empty() {
            return Err(AppError::Validation(format!(
                "media file '{}' is empty",
                upload.file_name
            )));
        }

        let file_name = upload
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("upload");
        let url = format!("media://{}/{}", Uuid::new_v4(), file_name);

        let mut objects = self
            .objects
            .lock()
            .map_err(|e| AppError::Media(format!("media store lock poisoned: {}", e)))?;
        objects.insert(url.clone(), upload.bytes);

        tracing::debug!(url = %url, content_type = %upload.content_type, "Stored media upload");
        Ok(MediaRef::new(url, upload.content_type))
    }

    fn fetch(&self, url: &str) -> AppResult<Option<Vec<u8>>> {
        let objects = self
            .objects
            .lock()
            .map_err(|e| AppError::Media(format!("media store lock poisoned: {}", e)))?;
        Ok(objects.get(url).cloned())
    }
}
