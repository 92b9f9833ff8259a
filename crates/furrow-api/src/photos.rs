//! Evidence photo persistence.
//!
//! Photo bytes never enter the database: they are written to a flat
//! directory, content-addressed by SHA-256, and referenced by path. Saves
//! are idempotent, identical bytes land on the same file.

use std::path::PathBuf;

use furrow_core::record::{NewPhoto, PhotoRef};
use sha2::{Digest, Sha256};

/// Writes evidence photos under a single configured directory.
#[derive(Debug, Clone)]
pub struct PhotoStore {
  dir: PathBuf,
}

impl PhotoStore {
  /// Create the store, ensuring the directory exists.
  pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
    let dir = dir.into();
    std::fs::create_dir_all(&dir)?;
    Ok(Self { dir })
  }

  /// Persist photo bytes and return the reference to store alongside the
  /// observation. The record write must only happen after this succeeds.
  pub async fn save(&self, photo: &NewPhoto) -> std::io::Result<PhotoRef> {
    let content_hash = hex::encode(Sha256::digest(&photo.bytes));
    let file_name = format!("{content_hash}.{}", extension(&photo.media_type));
    tokio::fs::write(self.dir.join(&file_name), &photo.bytes).await?;

    Ok(PhotoRef {
      path: file_name,
      content_hash,
      media_type: photo.media_type.clone(),
    })
  }
}

fn extension(media_type: &str) -> &'static str {
  match media_type {
    "image/jpeg" => "jpg",
    "image/png" => "png",
    _ => "bin",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_store(tag: &str) -> PhotoStore {
    let dir = std::env::temp_dir()
      .join(format!("furrow-photos-{tag}-{}", std::process::id()));
    PhotoStore::new(dir).unwrap()
  }

  #[tokio::test]
  async fn save_is_content_addressed() {
    let store = temp_store("content");
    let photo = NewPhoto {
      bytes:      vec![0xFF, 0xD8, 0xFF],
      media_type: "image/jpeg".into(),
    };

    let first = store.save(&photo).await.unwrap();
    let second = store.save(&photo).await.unwrap();

    assert_eq!(first, second);
    assert!(first.path.ends_with(".jpg"));
    assert_eq!(first.path, format!("{}.jpg", first.content_hash));
    assert!(store.dir.join(&first.path).exists());
  }

  #[tokio::test]
  async fn unknown_media_types_get_an_opaque_extension() {
    let store = temp_store("opaque");
    let photo = NewPhoto {
      bytes:      vec![1, 2, 3],
      media_type: "application/octet-stream".into(),
    };
    let saved = store.save(&photo).await.unwrap();
    assert!(saved.path.ends_with(".bin"));
  }
}
