pub mod pages;
pub mod portfolio;
pub mod tesla;
