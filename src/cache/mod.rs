//! Cache
//!
//! Este módulo contiene los sistemas de cache en proceso.

pub mod search_cache;

pub use search_cache::SearchCache;
