pub mod auth;
pub mod card;
pub mod dashboard;
pub mod deck;
pub mod study;
