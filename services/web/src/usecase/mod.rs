pub mod card;
pub mod credentials;
pub mod deck;
pub mod session;
pub mod study;
