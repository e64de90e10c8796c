//! Utilidades de validação
//!
//! Este módulo contém as funções de validação dos campos de filtro e a
//! conversão de valores em formato brasileiro (decimal com vírgula, datas).

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref RE_NOME_LOCALIDADE: Regex =
        Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ\s]+$").expect("regex de localidade inválida");
    static ref RE_CEP: Regex = Regex::new(r"^\d{8}$").expect("regex de CEP inválida");
    static ref RE_DDD: Regex = Regex::new(r"^\d{2}$").expect("regex de DDD inválida");
    static ref RE_CODIGO: Regex = Regex::new(r"^\d+$").expect("regex de código inválida");
}

/// Siglas oficiais das unidades federativas.
pub const UFS: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

fn erro(codigo: &'static str, valor: &str) -> ValidationError {
    let mut erro = ValidationError::new(codigo);
    erro.add_param("valor".into(), &valor.to_string());
    erro
}

/// Códigos CNAE e de natureza jurídica: somente dígitos.
pub fn validar_codigo(valor: &str) -> Result<(), ValidationError> {
    if RE_CODIGO.is_match(valor) {
        Ok(())
    } else {
        Err(erro("codigo", valor))
    }
}

/// CEP: exatamente 8 dígitos, sem hífen.
pub fn validar_cep(valor: &str) -> Result<(), ValidationError> {
    if RE_CEP.is_match(valor) {
        Ok(())
    } else {
        Err(erro("cep", valor))
    }
}

/// DDD: exatamente 2 dígitos.
pub fn validar_ddd(valor: &str) -> Result<(), ValidationError> {
    if RE_DDD.is_match(valor) {
        Ok(())
    } else {
        Err(erro("ddd", valor))
    }
}

/// Nomes de município e bairro: letras (com acentos) e espaços.
pub fn validar_localidade(valor: &str) -> Result<(), ValidationError> {
    if RE_NOME_LOCALIDADE.is_match(valor) {
        Ok(())
    } else {
        Err(erro("localidade", valor))
    }
}

/// Sigla de UF contida na tabela oficial.
pub fn validar_uf(valor: &str) -> Result<(), ValidationError> {
    if UFS.contains(&valor) {
        Ok(())
    } else {
        Err(erro("uf", valor))
    }
}

/// Converte um decimal em formato brasileiro ("1.500,50") para f64.
///
/// Valor vazio ou não numérico vira 0, que o montador de payload descarta.
pub fn converter_decimal_br(valor: &str) -> f64 {
    if valor.is_empty() {
        return 0.0;
    }
    valor.replace('.', "").replace(',', ".").parse().unwrap_or(0.0)
}

/// Formata uma data para o corpo da consulta (yyyy-MM-dd).
pub fn formatar_data_api(data: &NaiveDate) -> String {
    data.format("%Y-%m-%d").to_string()
}

/// Formata uma data para exibição (dd/MM/yyyy).
pub fn formatar_data_br(data: &NaiveDate) -> String {
    data.format("%d/%m/%Y").to_string()
}

/// Interpreta o limite de registros digitado; fallback 50.
pub fn converter_limite(valor: &str) -> u32 {
    valor.trim().parse().unwrap_or(50)
}
