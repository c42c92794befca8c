use super::ObjectStore;
use crate::models::ObjectKey;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

#[derive(Clone)]
pub struct MockObjectStore {
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
    bucket: String,
    unavailable: Arc<AtomicBool>,
    put_count: Arc<Mutex<usize>>,
    delete_count: Arc<Mutex<usize>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            bucket: "mock-bucket".to_string(),
            unavailable: Arc::new(AtomicBool::new(false)),
            put_count: Arc::new(Mutex::new(0)),
            delete_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_bucket(mut self, bucket: String) -> Self {
        self.bucket = bucket;
        self
    }

    pub fn with_object(self, key: String, data: Vec<u8>, content_type: &str) -> Self {
        self.objects.lock().unwrap().insert(
            key,
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        self
    }

    /// Makes every subsequent call fail as if the store were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn get_put_count(&self) -> usize {
        *self.put_count.lock().unwrap()
    }

    pub fn get_delete_count(&self) -> usize {
        *self.delete_count.lock().unwrap()
    }

    pub fn get_object_entry(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::StorageUnavailable(
                "mock store is unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn put_object(&self, key: &ObjectKey, data: &[u8], content_type: &str) -> Result<()> {
        self.check_available()?;
        *self.put_count.lock().unwrap() += 1;

        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data: data.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get_object(&self, key: &ObjectKey) -> Result<Vec<u8>> {
        self.check_available()?;

        let objects = self.objects.lock().unwrap();
        match objects.get(key.as_str()) {
            Some(object) => Ok(object.data.clone()),
            None => Err(Error::NotFound(key.to_string())),
        }
    }

    async fn delete_object(&self, key: &ObjectKey) -> Result<()> {
        self.check_available()?;
        *self.delete_count.lock().unwrap() += 1;

        self.objects.lock().unwrap().remove(key.as_str());
        Ok(())
    }

    async fn presign_get(&self, key: &ObjectKey, expires_in: Duration) -> Result<String> {
        self.check_available()?;

        Ok(format!(
            "https://{}.mock-store.example.com/{}?X-Amz-Expires={}&X-Amz-Signature=mock",
            self.bucket,
            key,
            expires_in.as_secs()
        ))
    }
}
