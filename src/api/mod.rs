pub mod finnhub;
pub mod finnhub_dto;
pub mod gemini;
pub mod gemini_dto;
pub mod mock;
pub mod utils;
