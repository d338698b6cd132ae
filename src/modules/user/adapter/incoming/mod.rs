pub mod routes;
pub mod web;
