//! Application state: the scanned library, the filtered view over it and the
//! cursor, plus the bridge into the shared player.

mod model;

pub use model::App;
