//! ghportfolio: stars, forks and clones of your public GitHub projects,
//! rendered as terminal tables, timelines and sparklines.

pub mod cli;
pub mod config;
pub mod services;
pub mod types;
