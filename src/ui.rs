//! Apresentação no terminal
//!
//! Renderização da tabela de resultados, avisos e prompts do CLI.

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::models::registro::RegistroArquivo;
use crate::pagination::{CampoFiltro, PaginacaoArquivos};
use crate::services::extracao_service::{Aviso, VarianteAviso};

/// Imprime um aviso no estilo do toast da interface.
pub fn exibir_aviso(aviso: &Aviso) {
    match aviso.variante {
        VarianteAviso::Normal => println!("✅ {} {}", aviso.titulo, aviso.descricao),
        VarianteAviso::Destrutiva => eprintln!("❌ {} {}", aviso.titulo, aviso.descricao),
    }
}

/// Pergunta sim/não; aceita "s", "sim" ou "y".
pub async fn confirmar(pergunta: &str) -> io::Result<bool> {
    print!("{} [s/N] ", pergunta);
    io::stdout().flush()?;
    let mut linhas = BufReader::new(tokio::io::stdin()).lines();
    let resposta = linhas.next_line().await?.unwrap_or_default();
    Ok(matches!(resposta.trim().to_lowercase().as_str(), "s" | "sim" | "y"))
}

/// Lê uma linha após o prompt.
pub async fn perguntar(prompt: &str) -> io::Result<String> {
    print!("{}: ", prompt);
    io::stdout().flush()?;
    let mut linhas = BufReader::new(tokio::io::stdin()).lines();
    Ok(linhas.next_line().await?.unwrap_or_default().trim().to_string())
}

/// Tabela de registros com colunas de largura fixa.
pub fn exibir_tabela(registros: &[RegistroArquivo]) {
    if registros.is_empty() {
        println!("  Nenhum resultado encontrado.");
        return;
    }
    println!(
        "  {:<18} {:<40} {:<12} {:<12} {:<6}",
        "CNPJ", "Nome", "Abertura", "Gerado em", "Tipo"
    );
    for registro in registros {
        println!(
            "  {:<18} {:<40} {:<12} {:<12} {:<6}",
            registro.id,
            truncar(&registro.nome, 40),
            registro.data,
            registro.ultima_modificacao,
            registro.tipo
        );
    }
}

fn truncar(texto: &str, largura: usize) -> String {
    if texto.chars().count() <= largura {
        return texto.to_string();
    }
    let cortado: String = texto.chars().take(largura.saturating_sub(1)).collect();
    format!("{}…", cortado)
}

/// Visão de detalhe de um registro, campo a campo.
pub fn exibir_detalhe(registro: &RegistroArquivo) {
    println!();
    println!("  Detalhes completos do CNPJ: {}", registro.id);
    for (rotulo, valor) in linhas_detalhe(registro) {
        println!("    {:<22} {}", rotulo, valor);
    }
}

fn detalhe_texto(valor: &serde_json::Value) -> Option<String> {
    match valor {
        serde_json::Value::String(texto) if !texto.is_empty() => Some(texto.clone()),
        serde_json::Value::Number(numero) => Some(numero.to_string()),
        _ => None,
    }
}

/// Pares rótulo/valor exibidos no detalhe; campos ausentes ficam de fora,
/// como no modal da interface.
fn linhas_detalhe(registro: &RegistroArquivo) -> Vec<(&'static str, String)> {
    let detalhes = &registro.detalhes;
    let campo = |caminho: &[&str]| -> Option<String> {
        let mut atual = detalhes.get(caminho[0])?;
        for parte in &caminho[1..] {
            atual = atual.get(parte)?;
        }
        detalhe_texto(atual)
    };

    let mut linhas = vec![
        ("Razão social", registro.nome.clone()),
        ("Data de abertura", registro.data.clone()),
    ];
    let mut incluir = |rotulo: &'static str, valor: Option<String>| {
        if let Some(valor) = valor {
            linhas.push((rotulo, valor));
        }
    };

    incluir("Nome fantasia", campo(&["nome_fantasia"]));
    incluir("Matriz/filial", campo(&["matriz_filial"]));
    incluir(
        "Situação cadastral",
        campo(&["situacao_cadastral", "situacao_atual"]),
    );
    incluir("Porte", campo(&["porte", "descricao"]));
    incluir("Natureza jurídica", campo(&["natureza_juridica", "descricao"]));
    incluir(
        "Capital social",
        detalhes
            .get("capital_social")
            .and_then(serde_json::Value::as_f64)
            .map(|valor| format!("R$ {:.2}", valor)),
    );
    incluir("Logradouro", {
        match (campo(&["endereco", "logradouro"]), campo(&["endereco", "numero"])) {
            (Some(logradouro), Some(numero)) => Some(format!("{}, {}", logradouro, numero)),
            (logradouro, None) => logradouro,
            (None, _) => None,
        }
    });
    incluir("Complemento", campo(&["endereco", "complemento"]));
    incluir("Bairro", campo(&["endereco", "bairro"]));
    incluir("Município/UF", {
        match (campo(&["endereco", "municipio"]), campo(&["endereco", "uf"])) {
            (Some(municipio), Some(uf)) => Some(format!("{} / {}", municipio, uf)),
            (municipio, None) => municipio,
            (None, _) => None,
        }
    });
    incluir("CEP", campo(&["endereco", "cep"]));
    incluir(
        "Atividade principal",
        campo(&["atividade_principal", "descricao"]),
    );

    if let Some(atividades) = detalhes
        .get("atividade_secundaria")
        .and_then(serde_json::Value::as_array)
    {
        for atividade in atividades {
            if let Some(descricao) = atividade.get("descricao").and_then(serde_json::Value::as_str) {
                linhas.push(("Atividade secundária", descricao.to_string()));
            }
        }
    }
    if let Some(socios) = detalhes
        .get("quadro_societario")
        .and_then(serde_json::Value::as_array)
    {
        for socio in socios {
            if let Some(nome) = socio.get("nome").and_then(serde_json::Value::as_str) {
                let linha = match socio
                    .get("qualificacao_socio")
                    .and_then(serde_json::Value::as_str)
                {
                    Some(qualificacao) => format!("{} ({})", nome, qualificacao),
                    None => nome.to_string(),
                };
                linhas.push(("Sócio", linha));
            }
        }
    }
    if let Some(telefones) = detalhes
        .get("contato_telefonico")
        .and_then(serde_json::Value::as_array)
    {
        for telefone in telefones {
            if let Some(completo) = telefone.get("completo").and_then(serde_json::Value::as_str) {
                linhas.push(("Telefone", completo.to_string()));
            }
        }
    }

    linhas
}

/// Navegação interativa pelas páginas da tabela.
///
/// Comandos: n (próxima), p (anterior), número (ir para a página),
/// f <termo> (filtrar por nome), v <linha> (detalhes do registro), q (sair).
pub async fn paginar_interativo(paginacao: &mut PaginacaoArquivos) -> io::Result<()> {
    let mut linhas = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let recorte = paginacao.atual();
        println!();
        exibir_tabela(&recorte.fatia);
        println!(
            "  Página {} de {} ({} registros)",
            paginacao.pagina_atual(),
            recorte.total_paginas,
            recorte.filtrados.len()
        );
        print!("[n] próxima  [p] anterior  [f termo] filtrar  [v linha] detalhes  [q] sair > ");
        io::stdout().flush()?;

        let Some(linha) = linhas.next_line().await? else {
            return Ok(());
        };
        let comando = linha.trim();
        match comando {
            "q" | "" => return Ok(()),
            "n" => paginacao.proxima(),
            "p" => paginacao.anterior(),
            _ => {
                if let Some(termo) = comando.strip_prefix("f ") {
                    paginacao.definir_filtro(CampoFiltro::Nome, termo.trim());
                } else if let Some(indice) = comando.strip_prefix("v ") {
                    let registro = indice
                        .trim()
                        .parse::<usize>()
                        .ok()
                        .and_then(|linha| linha.checked_sub(1))
                        .and_then(|posicao| recorte.fatia.get(posicao));
                    match registro {
                        Some(registro) => exibir_detalhe(registro),
                        None => println!("  Linha inexistente nesta página."),
                    }
                } else if let Ok(pagina) = comando.parse::<usize>() {
                    paginacao.mudar_pagina(pagina);
                } else {
                    println!("  Comando desconhecido: {}", comando);
                }
            }
        }
    }
}
