pub mod coerce;
pub mod diag;
pub mod error;
pub mod state;
pub mod vocab;

pub use diag::{Diagnostic, Validate};
pub use error::{Error, ErrorKind, to_exit_code};
pub use state::{Snapshot, decode_snapshot};
