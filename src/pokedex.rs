pub mod main;
pub mod outcome;
