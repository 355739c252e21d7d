#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod board;
pub mod geometry;
pub mod ordering;
pub mod solver;
pub mod topology;
