pub(crate) mod config;
pub(crate) mod pattern_engine;
pub(crate) mod region;
pub(crate) mod scheduler;
