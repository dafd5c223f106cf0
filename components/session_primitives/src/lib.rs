//! Types shared by the resolver, the download orchestrator and the front-ends.
//!
//! A session starts from one source URL, turns it into [`TrackTitle`]s and
//! reports every significant step as a [`SessionEvent`] through an [`EventLog`].

mod events;
mod title;

pub use events::{EventLog, SessionEvent};
pub use title::{TrackTitle, LYRIC_VIDEO_SUFFIX};
