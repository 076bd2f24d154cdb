pub mod check;
pub mod experiment;
pub mod generate;
pub mod mahonian;
