//! Configuração da aplicação

pub mod environment;

pub use environment::EnvironmentConfig;
