mod context;
mod edit;
mod model;

pub use context::AppContext;
pub use edit::SongEdit;
pub use model::{Song, SongData, tags_to_text};
