pub mod backend;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod report;
pub mod review;
