pub mod collision;
pub mod compute;
pub mod config;
pub mod constants;
pub mod display;
pub mod entities;
pub mod input;
pub mod power_ups;
