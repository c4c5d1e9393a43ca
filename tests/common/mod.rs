#![allow(dead_code)]

pub mod scripted_decoder;
pub mod strategies;

pub use scripted_decoder::*;
pub use strategies::*;
