pub mod builder;
pub mod config;
pub mod events;
pub mod parser;
pub mod pipeline;
pub mod sentence;
pub mod text;
