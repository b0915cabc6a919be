pub mod entity;
pub mod instance;
pub mod item;
pub mod player;
pub mod token;
pub mod tree;
