use std::path::Path;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;

use super::model::Track;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Result of metadata extraction: always a usable `Track`, plus an optional
/// diagnostic when tag reading was degraded to fallback values.
pub struct Extracted {
    pub track: Track,
    pub warning: Option<String>,
}

/// Format an integer second count as `m:ss` with zero-padded seconds.
pub fn format_duration(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Read tags from `path` into a `Track`, falling back per field.
///
/// Never fails: a tag-read error degrades only the affected fields (title
/// falls back to the filename stem, artist/album to the "Unknown" defaults,
/// duration to `0:00`) and is reported via `Extracted::warning`.
pub fn extract(path: &Path) -> Extracted {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut track = Track {
        track_number: String::new(),
        title: stem,
        artist: UNKNOWN_ARTIST.to_string(),
        album: UNKNOWN_ALBUM.to_string(),
        duration: "0:00".to_string(),
        year: String::new(),
        genre: String::new(),
        bitrate: String::new(),
        path: path.to_path_buf(),
    };

    let mut warning = None;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            track.duration = format_duration(tagged.properties().duration().as_secs());
            if let Some(kbps) = tagged.properties().audio_bitrate() {
                track.bitrate = kbps.to_string();
            }

            // Primary tag scheme first, any other tag block as fallback.
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = nonempty(tag.get_string(ItemKey::TrackTitle)) {
                    track.title = v;
                }
                if let Some(v) = nonempty(tag.get_string(ItemKey::TrackArtist)) {
                    track.artist = v;
                }
                if let Some(v) = nonempty(tag.get_string(ItemKey::AlbumTitle)) {
                    track.album = v;
                }
                if let Some(v) = nonempty(
                    tag.get_string(ItemKey::Year)
                        .or_else(|| tag.get_string(ItemKey::RecordingDate)),
                ) {
                    track.year = v;
                }
                if let Some(v) = nonempty(tag.get_string(ItemKey::Genre)) {
                    track.genre = v;
                }
                if let Some(v) = nonempty(tag.get_string(ItemKey::TrackNumber)) {
                    track.track_number = v;
                }
            }
        }
        Err(e) => {
            warning = Some(format!("{}: {e}", path.display()));
        }
    }

    Extracted { track, warning }
}

fn nonempty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn format_duration_zero_pads_seconds() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(215), "3:35");
        assert_eq!(format_duration(3600), "60:00");
    }

    #[test]
    fn extract_falls_back_to_filename_stem_on_unreadable_tags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("some_song.mp3");
        fs::write(&path, b"definitely not an mp3").unwrap();

        let extracted = extract(&path);
        assert!(extracted.warning.is_some());
        assert_eq!(extracted.track.title, "some_song");
        assert_eq!(extracted.track.artist, UNKNOWN_ARTIST);
        assert_eq!(extracted.track.album, UNKNOWN_ALBUM);
        assert_eq!(extracted.track.duration, "0:00");
        assert_eq!(extracted.track.track_number, "");
        assert_eq!(extracted.track.path, path);
    }

    #[test]
    fn extract_never_fails_for_missing_file() {
        let extracted = extract(Path::new("/no/such/dir/ghost.flac"));
        assert!(extracted.warning.is_some());
        assert_eq!(extracted.track.title, "ghost");
        assert_eq!(extracted.track.duration, "0:00");
    }
}
