//! Trait definitions at the tracker's seams.
//!
//! [`Invoke`] is the wrapped operation; [`ResultParser`] turns its raw
//! response into an [`ApiResult`](crate::ApiResult).

mod invoke;
mod parse;

pub use invoke::{AbortSignal, CallArgs, Invoke};
pub use parse::{JsonParser, ResultParser};
