// Service module exports

pub mod database;
pub mod diary;
pub mod mood;
pub mod settings;
