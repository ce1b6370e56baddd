//! 画像の読み込みとMIME判定
//!
//! 判定順: ファイル内容のシグネチャ → 拡張子。どちらでも画像と判定できなければ拒否する。

use crate::error::{FfeError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ffe_inventory_common::ImageInput;
use image::ImageFormat;
use std::path::Path;
use tracing::debug;

/// 画像ファイルを読み込む
pub fn load_image(path: &Path) -> Result<ImageInput> {
    if !path.is_file() {
        return Err(FfeError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let mime_type = detect_mime_type(path, &bytes)
        .ok_or_else(|| FfeError::UnsupportedImage(path.display().to_string()))?;

    debug!(path = %path.display(), mime_type, bytes = bytes.len(), "image loaded");
    Ok(ImageInput::new(bytes, mime_type))
}

/// MIMEタイプを判定
pub fn detect_mime_type(path: &Path, bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .ok()
        .map(|format| format.to_mime_type())
        .filter(|mime| mime.starts_with("image/"))
}

/// プレビュー用の Data URL（`data:<mime>;base64,<data>`）
pub fn data_url(image: &ImageInput) -> String {
    format!("data:{};base64,{}", image.mime_type, STANDARD.encode(&image.bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_detect_mime_from_content() {
        // 拡張子よりも内容を優先
        let mime = detect_mime_type(Path::new("photo.jpg"), PNG_SIGNATURE);
        assert_eq!(mime, Some("image/png"));
    }

    #[test]
    fn test_detect_mime_from_extension() {
        let mime = detect_mime_type(Path::new("living_room.jpeg"), b"not really a jpeg");
        assert_eq!(mime, Some("image/jpeg"));
    }

    #[test]
    fn test_detect_mime_rejects_text() {
        assert_eq!(detect_mime_type(Path::new("notes.txt"), b"hello"), None);
    }

    #[test]
    fn test_load_image_missing_file() {
        let result = load_image(Path::new("/nonexistent/room.png"));
        assert!(matches!(result, Err(FfeError::FileNotFound(_))));
    }

    #[test]
    fn test_load_image_rejects_non_image() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("inventory.txt");
        std::fs::write(&path, "sofa, chair").unwrap();

        let result = load_image(&path);
        assert!(matches!(result, Err(FfeError::UnsupportedImage(_))));
    }

    #[test]
    fn test_load_image_png() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("room.png");
        std::fs::write(&path, PNG_SIGNATURE).unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, PNG_SIGNATURE);
    }

    #[test]
    fn test_data_url() {
        let image = ImageInput::new(b"abc".to_vec(), "image/webp");
        assert_eq!(data_url(&image), "data:image/webp;base64,YWJj");
    }
}
