use bevy::prelude::Resource;
use crossbeam_channel::Receiver;

use crate::feed::{FeedHandle, Incoming};

#[derive(Resource)]
pub struct FeedRx(pub Receiver<Incoming>);

/// Present only while the feed thread is alive.
#[derive(Resource)]
pub struct FeedTx(pub FeedHandle);
