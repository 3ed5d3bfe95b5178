pub mod config;
pub mod drive;
pub mod messages;
pub mod net;
pub mod runtime;
pub mod web;
