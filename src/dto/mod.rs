//! DTOs da API
//!
//! Payloads trocados com o backend de consulta.

pub mod consulta_dto;
pub mod email_dto;

pub use consulta_dto::*;
pub use email_dto::*;
