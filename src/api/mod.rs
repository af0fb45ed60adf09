pub mod routes;

pub use routes::config;
