//! Search module for the Othello AI
//!
//! Contains the alpha-beta searcher with iterative deepening and a
//! per-node deadline check.

pub mod alphabeta;

pub use alphabeta::{SearchResult, SearchStats, Searcher};
