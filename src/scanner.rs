//! 評価対象フォルダのスキャン
//!
//! 同じファイル名（拡張子除く）のテキスト・画像・音声を1件の観察記録にまとめる。
//! 例: `bay3.txt` + `bay3.jpg` + `bay3.wav` → 観察記録 `bay3`

use crate::error::{Result, SafetyAiError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const TEXT_EXTENSIONS: &[&str] = &["txt"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "ogg", "webm"];

/// 観察記録（1件 = 1評価）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observation {
    pub name: String,
    pub text_path: Option<PathBuf>,
    pub image_path: Option<PathBuf>,
    pub audio_path: Option<PathBuf>,
}

impl Observation {
    /// テキストファイルの内容（なければ空）
    pub fn read_text(&self) -> Result<String> {
        match &self.text_path {
            Some(path) => Ok(std::fs::read_to_string(path)?.trim().to_string()),
            None => Ok(String::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaKind {
    Text,
    Image,
    Audio,
}

fn media_kind(path: &Path) -> Option<MediaKind> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Text)
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Audio)
    } else {
        None
    }
}

pub fn scan_folder(folder: &Path) -> Result<Vec<Observation>> {
    if !folder.is_dir() {
        return Err(SafetyAiError::FolderNotFound(folder.display().to_string()));
    }

    let mut groups: BTreeMap<String, Observation> = BTreeMap::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let Some(kind) = media_kind(path) else {
            continue;
        };

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let observation = groups.entry(name.clone()).or_insert_with(|| Observation {
            name,
            ..Default::default()
        });

        let slot = match kind {
            MediaKind::Text => &mut observation.text_path,
            MediaKind::Image => &mut observation.image_path,
            MediaKind::Audio => &mut observation.audio_path,
        };
        if slot.is_some() {
            log::warn!("同名ファイルが複数あります（先頭を使用）: {}", path.display());
            continue;
        }
        *slot = Some(path.to_path_buf());
    }

    // BTreeMap なので名前順
    Ok(groups.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_media_kind() {
        assert_eq!(media_kind(Path::new("a.txt")), Some(MediaKind::Text));
        assert_eq!(media_kind(Path::new("a.JPG")), Some(MediaKind::Image));
        assert_eq!(media_kind(Path::new("a.Wav")), Some(MediaKind::Audio));
        assert_eq!(media_kind(Path::new("a.pdf")), None);
        assert_eq!(media_kind(Path::new("noext")), None);
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(SafetyAiError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_empty() {
        let dir = tempdir().unwrap();
        assert!(scan_folder(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_groups_by_stem() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("bay3.txt")).unwrap().write_all(b"  hot work near tank \n").unwrap();
        File::create(dir.path().join("bay3.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("bay3.wav")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("alpha_scaffold.png")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("readme.md")).unwrap().write_all(b"ignored").unwrap();

        let observations = scan_folder(dir.path()).unwrap();
        assert_eq!(observations.len(), 2);

        assert_eq!(observations[0].name, "alpha_scaffold");
        assert!(observations[0].image_path.is_some());
        assert!(observations[0].text_path.is_none());
        assert_eq!(observations[0].read_text().unwrap(), "");

        assert_eq!(observations[1].name, "bay3");
        assert!(observations[1].image_path.is_some());
        assert!(observations[1].audio_path.is_some());
        assert_eq!(observations[1].read_text().unwrap(), "hot work near tank");
    }

    #[test]
    fn test_scan_does_not_recurse() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("inner.txt")).unwrap();

        assert!(scan_folder(dir.path()).unwrap().is_empty());
    }
}
