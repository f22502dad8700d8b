pub mod entry;
pub mod feed;

pub use entry::Entry;
pub use feed::{Feed, FeedStatus};
