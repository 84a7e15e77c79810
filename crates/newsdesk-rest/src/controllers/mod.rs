//! REST API controllers.

pub mod health_controller;
pub mod news_controller;
