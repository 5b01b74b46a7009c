// src/core/mod.rs

pub mod addr;
pub mod html;
pub mod sanitize;
