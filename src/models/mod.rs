//! Modelos de domínio
//!
//! Este módulo contém o estado do formulário de pesquisa, os registros de
//! resultado, as sugestões de autocomplete e os modelos de sessão.

pub mod filtros;
pub mod registro;
pub mod sugestao;
pub mod usuario;

pub use filtros::*;
pub use registro::*;
pub use sugestao::*;
pub use usuario::*;
