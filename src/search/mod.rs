pub mod bootstrap;
pub mod consumer;
pub mod handlers;
pub mod index;
pub mod model;
