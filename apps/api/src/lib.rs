pub mod analysis;
pub mod config;
pub mod db;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
