use image::imageops::FilterType;
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to save thumbnail {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to create cache directory {path}: {source}")]
    CacheDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("thumbnail task failed: {0}")]
    Join(String),
}

/// Expected thumbnail location for a project image (doesn't generate)
///
/// The name carries a hash of the source path, so pointing a project at a
/// different image never reuses the old thumbnail.
pub fn thumbnail_path(cache_dir: &Path, project_id: u32, source: &Path) -> PathBuf {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    cache_dir.join(format!("{}-{:016x}.png", project_id, hasher.finish()))
}

/// A cached thumbnail is reusable when it is at least as new as its source
fn is_fresh(thumbnail: &Path, source: &Path) -> bool {
    let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();
    match (modified(thumbnail), modified(source)) {
        (Some(thumb), Some(src)) => thumb >= src,
        _ => false,
    }
}

/// Generate (or reuse) the card thumbnail for one project image
///
/// The image is scaled so its longest edge is `size` pixels and written
/// as PNG into `cache_dir`.
pub fn generate_thumbnail(
    source: &Path,
    cache_dir: &Path,
    project_id: u32,
    size: u32,
) -> Result<PathBuf, AssetError> {
    let path = thumbnail_path(cache_dir, project_id, source);
    if is_fresh(&path, source) {
        return Ok(path);
    }

    fs::create_dir_all(cache_dir).map_err(|source| AssetError::CacheDir {
        path: cache_dir.to_path_buf(),
        source,
    })?;

    let img = image::open(source).map_err(|e| AssetError::Decode {
        path: source.to_path_buf(),
        source: e,
    })?;

    // Never upscale small images
    let thumbnail = if img.width().max(img.height()) > size {
        img.resize(size, size, FilterType::Lanczos3)
    } else {
        img
    };

    thumbnail.save(&path).map_err(|source| AssetError::Save {
        path: path.clone(),
        source,
    })?;

    tracing::debug!("📸 Generated thumbnail: {}", path.display());
    Ok(path)
}

/// Generate thumbnails for a batch of `(project id, source image)` pairs
/// on the blocking pool. Failures are logged and skipped.
pub async fn generate_thumbnails(
    jobs: Vec<(u32, PathBuf)>,
    cache_dir: PathBuf,
    size: u32,
) -> Vec<(u32, PathBuf)> {
    let result = tokio::task::spawn_blocking(move || {
        jobs.into_iter()
            .filter_map(|(id, source)| {
                match generate_thumbnail(&source, &cache_dir, id, size) {
                    Ok(path) => Some((id, path)),
                    Err(e) => {
                        tracing::warn!(project = id, error = %e, "thumbnail generation failed");
                        None
                    }
                }
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| AssetError::Join(e.to_string()));

    match result {
        Ok(generated) => {
            tracing::info!("✅ {} thumbnails ready", generated.len());
            generated
        }
        Err(e) => {
            tracing::error!(error = %e, "thumbnail batch aborted");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([120, 40, 200]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_thumbnail_is_scaled_down() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_image(dir.path(), "big.png", 800, 400);
        let cache = dir.path().join("cache");

        let path = generate_thumbnail(&source, &cache, 3, 200).unwrap();

        assert_eq!(path, thumbnail_path(&cache, 3, &source));
        let thumb = image::open(&path).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (200, 100));
    }

    #[test]
    fn test_small_images_are_not_upscaled() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_image(dir.path(), "small.png", 50, 40);

        let path = generate_thumbnail(&source, dir.path(), 1, 200).unwrap();
        let thumb = image::open(&path).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (50, 40));
    }

    #[test]
    fn test_undecodable_source_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.png");
        fs::write(&source, b"not an image").unwrap();

        let err = generate_thumbnail(&source, dir.path(), 1, 200).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn test_batch_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_image(dir.path(), "good.png", 10, 10);
        let expected = thumbnail_path(&dir.path().join("cache"), 1, &good);
        let missing = dir.path().join("missing.png");
        let cache = dir.path().join("cache");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let generated = runtime.block_on(generate_thumbnails(
            vec![(1, good), (2, missing)],
            cache.clone(),
            64,
        ));

        assert_eq!(generated, vec![(1, expected)]);
    }

    #[test]
    fn test_switching_to_an_older_source_regenerates() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache");

        let red = dir.path().join("red.png");
        RgbImage::from_pixel(8, 8, Rgb([255, 0, 0])).save(&red).unwrap();
        let first = generate_thumbnail(&red, &cache, 1, 64).unwrap();

        // The replacement image predates the cached thumbnail
        let blue = dir.path().join("blue.png");
        RgbImage::from_pixel(8, 8, Rgb([0, 0, 255])).save(&blue).unwrap();
        let an_hour_ago = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
        fs::File::options()
            .write(true)
            .open(&blue)
            .unwrap()
            .set_modified(an_hour_ago)
            .unwrap();

        let second = generate_thumbnail(&blue, &cache, 1, 64).unwrap();

        assert_ne!(first, second);
        let pixel = image::open(&second).unwrap().to_rgb8().get_pixel(0, 0).0;
        assert_eq!(pixel, [0, 0, 255]);
    }

    #[test]
    fn test_unchanged_source_reuses_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_image(dir.path(), "cover.png", 20, 20);

        let first = generate_thumbnail(&source, dir.path(), 4, 64).unwrap();
        let written = fs::metadata(&first).unwrap().modified().unwrap();
        let second = generate_thumbnail(&source, dir.path(), 4, 64).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::metadata(&second).unwrap().modified().unwrap(), written);
    }
}
