pub mod chat;
pub mod records;
pub mod trip;
pub mod user;
