pub mod antibot;
pub mod history;
