//! Controller input.

mod controller;

pub use controller::{Button, Controller};
