pub mod launch;

pub use launch::{load_launches, parse_launches, Launch};
