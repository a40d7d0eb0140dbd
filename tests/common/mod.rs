#![allow(dead_code)]

pub mod given;

pub use test_context::*;
