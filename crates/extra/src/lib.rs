#![deny(bare_trait_objects)]

//! Optional utilities for the quill crates: an SVG path data parser and a few
//! sample drawings used by the tests, the command line tool and the benchmarks.

pub extern crate quill_path as path;

pub use path::geom::euclid;
pub use path::math;

pub mod parser;
pub mod scenes;
