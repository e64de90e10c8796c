//! Payload da consulta de CNPJs
//!
//! Este módulo define o DTO enviado para POST /cnpj-query e a montagem a
//! partir dos filtros do formulário. O contrato com o backend é esparso:
//! campo não preenchido fica fora do JSON, nunca vai como lista vazia ou
//! falso explícito. Os grupos `mei` e `mais_filtros` são a exceção e vão
//! sempre inteiros, porque o backend espera o sub-objeto completo.

use serde::{Deserialize, Serialize};

use crate::models::filtros::FiltrosPesquisa;
use crate::utils::validation::{converter_decimal_br, converter_limite, formatar_data_api};

/// Cláusula de busca textual sobre razão social e nome fantasia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuscaTextual {
    pub texto: Vec<String>,
    pub tipo_busca: String,
    pub razao_social: bool,
    pub nome_fantasia: bool,
    pub nome_socio: bool,
}

impl BuscaTextual {
    /// Busca "contém" sobre razão social e nome fantasia, nunca sobre o
    /// nome do sócio.
    pub fn contem(texto: &str) -> Self {
        Self {
            texto: vec![texto.to_string()],
            tipo_busca: "CONTEM".to_string(),
            razao_social: true,
            nome_fantasia: true,
            nome_socio: false,
        }
    }
}

/// Faixa de data de abertura (yyyy-MM-dd); limites ausentes ficam fora.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodoData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fim: Option<String>,
}

impl PeriodoData {
    fn vazio(&self) -> bool {
        self.inicio.is_none() && self.fim.is_none()
    }
}

/// Faixa de capital social; só limites maiores que zero entram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaixaCapital {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximo: Option<f64>,
}

impl FaixaCapital {
    fn vazia(&self) -> bool {
        self.minimo.is_none() && self.maximo.is_none()
    }
}

/// Filtros de enquadramento MEI; o sub-objeto vai sempre completo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiltrosMei {
    pub optante: bool,
    pub excluir_optante: bool,
}

/// Demais filtros booleanos; o sub-objeto vai sempre completo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaisFiltros {
    pub somente_matriz: bool,
    pub somente_filial: bool,
    pub com_email: bool,
    pub com_telefone: bool,
    pub somente_fixo: bool,
    pub somente_celular: bool,
}

/// Payload esparso de POST /cnpj-query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsultaPayload {
    pub pagina: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busca_textual: Option<Vec<BuscaTextual>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub codigo_atividade_principal: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub codigo_natureza_juridica: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub situacao_cadastral: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uf: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub municipio: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bairro: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cep: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ddd: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_abertura: Option<PeriodoData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital_social: Option<FaixaCapital>,
    pub mei: FiltrosMei,
    pub mais_filtros: MaisFiltros,
    pub limite: u32,
}

impl ConsultaPayload {
    /// Monta o payload a partir dos filtros do formulário.
    ///
    /// Função pura: acumula em um registro próprio e o devolve, sem efeito
    /// em rede ou em estado compartilhado.
    pub fn montar(filtros: &FiltrosPesquisa) -> Self {
        let busca_textual = if filtros.razao_social.is_empty() {
            None
        } else {
            Some(vec![BuscaTextual::contem(&filtros.razao_social)])
        };

        let data_abertura = Some(PeriodoData {
            inicio: filtros.abertura_de.as_ref().map(formatar_data_api),
            fim: filtros.abertura_ate.as_ref().map(formatar_data_api),
        })
        .filter(|periodo| !periodo.vazio());

        let minimo = converter_decimal_br(&filtros.capital_de);
        let maximo = converter_decimal_br(&filtros.capital_ate);
        let capital_social = Some(FaixaCapital {
            minimo: Some(minimo).filter(|valor| *valor > 0.0),
            maximo: Some(maximo).filter(|valor| *valor > 0.0),
        })
        .filter(|faixa| !faixa.vazia());

        Self {
            pagina: 0,
            busca_textual,
            codigo_atividade_principal: filtros.atividade_principal.clone(),
            codigo_natureza_juridica: filtros.natureza_juridica.clone(),
            situacao_cadastral: filtros
                .situacao_cadastral
                .map(|situacao| vec![situacao.to_string()])
                .unwrap_or_default(),
            uf: filtros.uf.clone(),
            municipio: filtros.municipio.clone(),
            bairro: filtros.bairro.clone(),
            cep: filtros.cep.clone(),
            ddd: filtros.ddd.clone(),
            data_abertura,
            capital_social,
            mei: FiltrosMei {
                optante: filtros.somente_mei,
                excluir_optante: filtros.excluir_mei,
            },
            mais_filtros: MaisFiltros {
                somente_matriz: filtros.somente_matriz,
                somente_filial: filtros.somente_filial,
                com_email: filtros.com_email,
                com_telefone: filtros.com_telefone,
                somente_fixo: filtros.somente_fixo,
                somente_celular: filtros.somente_celular,
            },
            limite: converter_limite(&filtros.limite),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn chaves(payload: &ConsultaPayload) -> Vec<String> {
        let valor = serde_json::to_value(payload).expect("payload serializável");
        valor
            .as_object()
            .expect("payload é um objeto")
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn filtros_vazios_geram_apenas_paginacao_e_grupos_fixos() {
        let payload = ConsultaPayload::montar(&FiltrosPesquisa::default());
        let mut nomes = chaves(&payload);
        nomes.sort();
        assert_eq!(nomes, vec!["limite", "mais_filtros", "mei", "pagina"]);
        assert_eq!(payload.pagina, 0);
        assert_eq!(payload.limite, 50);
    }

    #[test]
    fn razao_social_vira_clausula_de_busca_textual() {
        let filtros = FiltrosPesquisa {
            razao_social: "Acme".to_string(),
            ..FiltrosPesquisa::default()
        };
        let payload = ConsultaPayload::montar(&filtros);
        let clausulas = payload.busca_textual.expect("cláusula presente");
        assert_eq!(clausulas.len(), 1);
        assert_eq!(clausulas[0].texto, vec!["Acme"]);
        assert_eq!(clausulas[0].tipo_busca, "CONTEM");
        assert!(clausulas[0].razao_social);
        assert!(clausulas[0].nome_fantasia);
        assert!(!clausulas[0].nome_socio);
    }

    #[test]
    fn capital_em_formato_brasileiro_e_descarte_de_nao_positivos() {
        let filtros = FiltrosPesquisa {
            capital_de: "1.500,50".to_string(),
            capital_ate: "abc".to_string(),
            ..FiltrosPesquisa::default()
        };
        let payload = ConsultaPayload::montar(&filtros);
        let faixa = payload.capital_social.expect("faixa presente");
        assert_eq!(faixa.minimo, Some(1500.50));
        assert_eq!(faixa.maximo, None);
    }

    #[test]
    fn capital_todo_invalido_fica_fora_do_payload() {
        let filtros = FiltrosPesquisa {
            capital_de: "0".to_string(),
            capital_ate: String::new(),
            ..FiltrosPesquisa::default()
        };
        let payload = ConsultaPayload::montar(&filtros);
        assert!(payload.capital_social.is_none());
    }

    #[test]
    fn data_abertura_somente_inicio() {
        let filtros = FiltrosPesquisa {
            abertura_de: NaiveDate::from_ymd_opt(2021, 6, 1),
            ..FiltrosPesquisa::default()
        };
        let payload = ConsultaPayload::montar(&filtros);
        let periodo = payload.data_abertura.as_ref().expect("período presente");
        assert_eq!(periodo.inicio.as_deref(), Some("2021-06-01"));
        assert!(periodo.fim.is_none());

        let json = serde_json::to_value(&payload).expect("serializável");
        let objeto = json["data_abertura"].as_object().expect("sub-objeto");
        assert_eq!(objeto.len(), 1);
    }

    #[test]
    fn sem_datas_o_sub_objeto_fica_fora() {
        let payload = ConsultaPayload::montar(&FiltrosPesquisa::default());
        assert!(payload.data_abertura.is_none());
    }

    #[test]
    fn limite_invalido_cai_no_padrao() {
        let filtros = FiltrosPesquisa {
            limite: "muitos".to_string(),
            ..FiltrosPesquisa::default()
        };
        assert_eq!(ConsultaPayload::montar(&filtros).limite, 50);
    }

    #[test]
    fn grupos_de_interruptores_vao_completos_mesmo_desligados() {
        let payload = ConsultaPayload::montar(&FiltrosPesquisa::default());
        let json = serde_json::to_value(&payload).expect("serializável");
        let mei = json["mei"].as_object().expect("sub-objeto mei");
        assert_eq!(mei.len(), 2);
        assert_eq!(mei["optante"], false);
        let mais = json["mais_filtros"].as_object().expect("sub-objeto mais_filtros");
        assert_eq!(mais.len(), 6);
    }
}
