#![allow(dead_code)]

pub mod fake_upstream;
pub mod multipart;
pub mod pdf;
pub mod scripted_llm;
