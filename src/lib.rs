pub mod api_football;
pub mod battery;
pub mod board;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod connect;
pub mod crest;
pub mod error;
pub mod fake_feed;
pub mod http_client;
pub mod layout;
pub mod league_table;
pub mod model;
pub mod presentation;
pub mod selector;
pub mod source;
pub mod text;
