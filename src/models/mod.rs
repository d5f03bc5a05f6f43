// Module exports for models

pub mod diary;
pub mod mood;
pub mod settings;
