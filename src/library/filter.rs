use super::model::Track;

/// Compute the filtered view: indices of tracks whose title, artist or album
/// contains `query` case-insensitively.
///
/// A blank query returns the identity ordering. Pure and total; nothing is
/// retained between calls.
pub fn filter_indices(tracks: &[Track], query: &str) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return (0..tracks.len()).collect();
    }

    tracks
        .iter()
        .enumerate()
        .filter(|(_, t)| matches_query(t, &query))
        .map(|(i, _)| i)
        .collect()
}

fn matches_query(track: &Track, query_lower: &str) -> bool {
    track.title.to_lowercase().contains(query_lower)
        || track.artist.to_lowercase().contains(query_lower)
        || track.album.to_lowercase().contains(query_lower)
}
