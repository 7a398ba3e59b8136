pub mod comment;
pub mod event;
pub mod game;
pub mod score;

pub use comment::{Comment, CommentKind, IDLE_LEVEL};
pub use event::{ensure_sorted, event_id, Event, EventKind, KindInfo, Tag};
pub use game::{Game, Team};
pub use score::ScoreUpdate;
