//! Data Transfer Objects (DTOs).

mod news_dto;

pub use news_dto::*;
