use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::extract::extract;
use super::model::Track;

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "mp3" | "flac" | "ogg" | "m4a" | "wav"
            )
        })
        .unwrap_or(false)
}

/// Walk `dir` recursively and build a library of tracks.
///
/// Order is the traversal order of the walk; no sort is applied. A missing
/// root yields an empty library, and per-file extraction problems degrade to
/// fallback fields without aborting the walk.
pub fn scan(dir: &Path) -> Vec<Track> {
    if !dir.exists() {
        debug!("library root {} does not exist, skipping", dir.display());
        return Vec::new();
    }

    let mut tracks: Vec<Track> = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path) {
            let extracted = extract(path);
            if let Some(w) = extracted.warning {
                warn!("tag read degraded for {w}");
            }
            tracks.push(extracted.track);
        }
    }
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_supported_extensions_case_insensitive() {
        assert!(is_audio_file(Path::new("/tmp/a.mp3")));
        assert!(is_audio_file(Path::new("/tmp/a.MP3")));
        assert!(is_audio_file(Path::new("/tmp/a.flac")));
        assert!(is_audio_file(Path::new("/tmp/a.ogg")));
        assert!(is_audio_file(Path::new("/tmp/a.m4a")));
        assert!(is_audio_file(Path::new("/tmp/a.wav")));
        assert!(!is_audio_file(Path::new("/tmp/a.txt")));
        assert!(!is_audio_file(Path::new("/tmp/a")));
    }

    #[test]
    fn scan_missing_root_is_empty_not_an_error() {
        assert!(scan(Path::new("/no/such/music/folder")).is_empty());
    }

    #[test]
    fn scan_skips_non_audio_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let tracks = scan(dir.path());
        assert_eq!(tracks.len(), 2);
        assert!(tracks.iter().all(|t| is_audio_file(&t.path)));
        assert!(tracks.iter().all(|t| t.path.starts_with(dir.path())));
    }

    #[test]
    fn scan_recurses_into_subdirectories() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("album").join("disc1");
        fs::create_dir_all(&sub).unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        fs::write(sub.join("deep.flac"), b"not real").unwrap();

        let titles: Vec<String> = scan(dir.path()).into_iter().map(|t| t.title).collect();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains(&"root".to_string()));
        assert!(titles.contains(&"deep".to_string()));
    }

    #[test]
    fn scan_degrades_unreadable_tags_to_fallback_fields() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("mystery.wav"), b"garbage bytes").unwrap();

        let tracks = scan(dir.path());
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "mystery");
        assert_eq!(tracks[0].artist, "Unknown Artist");
        assert_eq!(tracks[0].album, "Unknown Album");
        assert_eq!(tracks[0].duration, "0:00");
    }

}
