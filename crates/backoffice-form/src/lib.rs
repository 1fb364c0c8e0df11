mod error;
mod event;
mod path;
mod state;
mod status;
mod time;

pub use error::FormError;
pub use event::{FieldEvent, InputKind};
pub use path::{Segment, parse_path, read_path, write_path};
pub use state::FormState;
pub use status::{STATUS_TTL, StatusKind, StatusMessage};
pub use time::{DEFAULT_TIME, combine_date_time, normalize_time};
