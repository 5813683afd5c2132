pub mod protocol;
pub mod sim;

pub use protocol::{FeedCommand, Incoming};
pub use sim::{spawn_feed, FeedHandle, FeedSettings};
