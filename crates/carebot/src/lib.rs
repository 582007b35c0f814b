pub mod agent;
pub mod backend;
pub mod components;
pub mod config;
pub mod errors;
pub mod forms;
pub mod models;
pub mod payload;
pub mod session;
pub mod tools;
pub mod views;
