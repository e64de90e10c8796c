//! Paginação em memória dos resultados
//!
//! A consulta devolve o conjunto inteiro de uma vez; o recorte por página e
//! o filtro por termo acontecem todos no cliente. O cálculo é puro e pode
//! ser memoizado por (dados, termo, página).

use crate::models::registro::RegistroArquivo;

/// Campo da tabela usado no filtro por termo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampoFiltro {
    Nome,
    UltimaModificacao,
    Data,
    /// Qualquer outro seletor: não filtra nada.
    #[default]
    Todos,
}

impl std::str::FromStr for CampoFiltro {
    type Err = std::convert::Infallible;

    /// Seletor desconhecido cai em `Todos`, que aceita qualquer registro.
    fn from_str(valor: &str) -> Result<Self, Self::Err> {
        Ok(match valor {
            "nome" => CampoFiltro::Nome,
            "ultima-modificacao" => CampoFiltro::UltimaModificacao,
            "data" => CampoFiltro::Data,
            _ => CampoFiltro::Todos,
        })
    }
}

/// Resultado do recorte de uma página.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginado {
    pub filtrados: Vec<RegistroArquivo>,
    pub fatia: Vec<RegistroArquivo>,
    pub total_paginas: usize,
}

/// Filtra por termo (case-insensitive, substring) e recorta a página
/// pedida, 1-based. Página além do total rende fatia vazia; não há clamp.
///
/// `por_pagina` deve ser maior que zero.
pub fn paginar(
    dados: &[RegistroArquivo],
    campo: CampoFiltro,
    termo: &str,
    pagina: usize,
    por_pagina: usize,
) -> Paginado {
    let filtrados: Vec<RegistroArquivo> = if termo.is_empty() {
        dados.to_vec()
    } else {
        let termo = termo.to_lowercase();
        dados
            .iter()
            .filter(|registro| {
                let alvo = match campo {
                    CampoFiltro::Nome => &registro.nome,
                    CampoFiltro::UltimaModificacao => &registro.ultima_modificacao,
                    CampoFiltro::Data => &registro.data,
                    CampoFiltro::Todos => return true,
                };
                alvo.to_lowercase().contains(&termo)
            })
            .cloned()
            .collect()
    };

    let total_paginas = filtrados.len().div_ceil(por_pagina);
    let inicio = pagina.saturating_sub(1) * por_pagina;
    let fatia = filtrados.iter().skip(inicio).take(por_pagina).cloned().collect();

    Paginado {
        filtrados,
        fatia,
        total_paginas,
    }
}

/// Estado de paginação da tabela de resultados.
///
/// A página atual não é ajustada quando o conjunto filtrado encolhe; a
/// tabela fica vazia até o usuário navegar.
#[derive(Debug, Clone)]
pub struct PaginacaoArquivos {
    dados: Vec<RegistroArquivo>,
    campo: CampoFiltro,
    termo: String,
    pagina_atual: usize,
    por_pagina: usize,
}

impl PaginacaoArquivos {
    pub fn new(dados: Vec<RegistroArquivo>, por_pagina: usize) -> Self {
        Self {
            dados,
            campo: CampoFiltro::default(),
            termo: String::new(),
            pagina_atual: 1,
            por_pagina,
        }
    }

    pub fn pagina_atual(&self) -> usize {
        self.pagina_atual
    }

    pub fn atual(&self) -> Paginado {
        paginar(
            &self.dados,
            self.campo,
            &self.termo,
            self.pagina_atual,
            self.por_pagina,
        )
    }

    pub fn mudar_pagina(&mut self, pagina: usize) {
        self.pagina_atual = pagina.max(1);
    }

    pub fn proxima(&mut self) {
        self.pagina_atual += 1;
    }

    pub fn anterior(&mut self) {
        self.pagina_atual = self.pagina_atual.saturating_sub(1).max(1);
    }

    /// Troca o filtro por termo; a página atual fica onde está.
    pub fn definir_filtro(&mut self, campo: CampoFiltro, termo: &str) {
        self.campo = campo;
        self.termo = termo.to_string();
    }

    /// Uma nova pesquisa sobrescreve os dados; a página atual fica onde
    /// está.
    pub fn substituir_dados(&mut self, dados: Vec<RegistroArquivo>) {
        self.dados = dados;
    }
}
