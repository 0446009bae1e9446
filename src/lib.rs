// src/lib.rs
pub mod domain;
pub mod persistence;
pub mod web;

pub use domain::*;
