pub mod feeds;
pub mod urls;

pub use feeds::{load_term_feeds, Feed};
