pub mod attempt;
pub mod extract;
pub mod health;
pub mod quiz;
