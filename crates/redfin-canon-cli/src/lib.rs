//! Command-line front end for `redfin-canon`: HTTP redirect resolution,
//! batch runs over URL lists, and report output.

pub mod batch;
pub mod cli;
pub mod resolver;
pub mod throttle;
