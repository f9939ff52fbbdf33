pub mod assets;
pub mod health;
pub mod page;
pub mod token;
