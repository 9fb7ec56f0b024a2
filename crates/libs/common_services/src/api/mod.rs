pub mod album;
pub mod auth;
pub mod photos;
pub mod representation;
pub mod tags;
pub mod users;
pub mod validation;
