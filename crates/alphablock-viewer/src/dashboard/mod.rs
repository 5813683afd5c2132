pub mod input;
pub mod state;

use bevy::prelude::{Res, ResMut, Time};
use chrono::Utc;

pub use input::drag_input;
pub use state::{DashboardState, FeedStatus, SupportTab};

pub fn tick_housekeeping(time: Res<Time>, mut st: ResMut<DashboardState>) {
    st.now = Utc::now();
    st.toasts.tick(time.elapsed_seconds_f64());
}
