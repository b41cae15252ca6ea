use std::path::PathBuf;

/// One audio file's descriptive record plus its filesystem path.
///
/// All descriptive fields are carried as display text exactly as found in the
/// tags (or as fallback values); `path` is the unique key within a library
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub track_number: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Duration formatted `m:ss` with zero-padded seconds; `0:00` when unknown.
    pub duration: String,
    pub year: String,
    pub genre: String,
    /// Bitrate as plain text, no unit conversion.
    pub bitrate: String,
    pub path: PathBuf,
}

impl Track {
    /// Parse the `m:ss` duration back into seconds. Unparseable values count
    /// as zero so summary math never fails.
    pub fn duration_secs(&self) -> u64 {
        let mut parts = self.duration.splitn(2, ':');
        match (parts.next(), parts.next()) {
            (Some(m), Some(s)) => {
                let minutes = m.trim().parse::<u64>().unwrap_or(0);
                let seconds = s.trim().parse::<u64>().unwrap_or(0);
                minutes * 60 + seconds
            }
            _ => 0,
        }
    }
}
