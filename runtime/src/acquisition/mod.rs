//! Outbound page acquisition.
//!
//! Plain HTTP only. `browserHtml` is served from the same fetch, no
//! rendering happens.

pub mod http_client;
