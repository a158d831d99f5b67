// src/app/mod.rs
//
// Desktop shell bootstrap.

pub mod desktop;

pub use desktop::run;
