//! JSON-RPC style dispatcher
//!
//! One POST body carries `{method, params, id}`; the reply always echoes
//! `id` and carries exactly one of `result` or `error`.

mod dispatcher;
mod envelope;
mod params;

pub use dispatcher::{Dispatcher, METHODS};
pub use envelope::*;
