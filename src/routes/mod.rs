pub mod contact;
pub mod freeform;
pub mod health;
pub mod plan;
pub mod trip;
pub mod user;
