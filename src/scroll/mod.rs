pub mod lock;
pub mod smooth;
pub mod watch;

pub use lock::BodyLock;
pub use smooth::{scroll_to, scroll_to_anchor, ScrollShell};
pub use watch::use_frame_scroll;
