//! Upstream proxy API handlers.
//!
//! These routes exist so the browser only ever talks to this origin: they
//! forward to the upstream commerce API, normalize currency fields, and
//! echo everything else back as close to verbatim as possible.

pub mod categories;
pub mod image_proxy;
pub mod products;
pub mod search;
