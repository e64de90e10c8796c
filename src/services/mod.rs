//! Services module
//!
//! Este módulo contém a lógica de negócio do cliente: os serviços REST e a
//! máquina de estados do fluxo de pesquisa.

pub mod auth_service;
pub mod documento_service;
pub mod extracao_service;
pub mod sugestao_service;

pub use auth_service::*;
pub use documento_service::*;
pub use extracao_service::*;
pub use sugestao_service::*;
