pub mod classify;
pub mod views;
