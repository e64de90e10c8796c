//! Cliente de extração de leads CNPJ
//!
//! Esta biblioteca implementa o núcleo do cliente de extração: montagem do
//! payload de consulta, serviços REST, autocomplete com debounce, paginação
//! em memória e o fluxo de submissão de pesquisa.

pub mod autocomplete;
pub mod client;
pub mod config;
pub mod dto;
pub mod models;
pub mod pagination;
pub mod services;
pub mod state;
pub mod ui;
pub mod utils;
