//! Main module for wakabamark library functionality

pub mod ast;
pub mod combinators;
pub mod error;
pub mod grammar;
pub mod testing;
