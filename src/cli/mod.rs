pub mod prices;
pub mod setup;
pub mod swap;
pub mod ui;
