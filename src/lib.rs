pub mod configuration;
pub mod database;
pub mod model;
pub mod observability;
pub mod routes;
pub mod seed;
pub mod services;
pub mod smoke;
pub mod startup;
