//! CLI de extração de leads CNPJ
//!
//! Fachada de terminal sobre a biblioteca: pesquisa com confirmação e
//! tabela paginada, envio por e-mail, sugestões (com modo interativo),
//! saldo, documentos e sessão.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;

use lead_extraction::autocomplete::{CampoAutocompletar, FonteSugestoes, ATRASO_DIGITACAO};
use lead_extraction::config::EnvironmentConfig;
use lead_extraction::dto::email_dto::{DetalhesEnvio, FormatoArquivo};
use lead_extraction::models::filtros::{CampoLista, FiltrosPesquisa};
use lead_extraction::pagination::PaginacaoArquivos;
use lead_extraction::services::documento_service::DocumentoService;
use lead_extraction::services::extracao_service::{EstadoFluxo, FluxoPesquisa};
use lead_extraction::services::sugestao_service::TipoSugestao;
use lead_extraction::state::AppContext;
use lead_extraction::ui;

#[derive(Parser)]
#[command(
    name = "lead_extraction",
    about = "Cliente de extração de leads da base de CNPJs",
    version
)]
struct Cli {
    /// URL base da API (sobrepõe API_BASE_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    comando: Comando,
}

#[derive(Subcommand)]
enum Comando {
    /// Pesquisa CNPJs com os filtros informados
    Pesquisar(ArgsPesquisar),
    /// Pesquisa e envia o resultado por e-mail
    EnviarEmail(ArgsEnviarEmail),
    /// Consulta sugestões de empresas, CNAE ou natureza jurídica
    Sugestoes(ArgsSugestoes),
    /// Saldo de consultas do usuário logado
    Saldo,
    /// Lista os documentos gerados para o usuário
    Documentos(ArgsDocumentos),
    /// Verifica a sessão ativa no servidor
    Sessao,
    /// Autentica e grava o cookie de sessão
    Login(ArgsLogin),
    /// Encerra a sessão no servidor
    Logout,
    /// Solicita a recuperação de senha, ou redefine com o token recebido
    RecuperarSenha(ArgsRecuperarSenha),
}

#[derive(Args)]
struct ArgsFiltros {
    /// Razão social ou nome fantasia (busca "contém")
    #[arg(long)]
    razao_social: Option<String>,

    /// Código CNAE da atividade principal (repetível)
    #[arg(long = "cnae")]
    atividade_principal: Vec<String>,

    /// Código da natureza jurídica (repetível)
    #[arg(long = "natureza")]
    natureza_juridica: Vec<String>,

    /// Situação cadastral: ativa, baixada, inapta, suspensa ou nula
    #[arg(long)]
    situacao: Option<String>,

    /// Estado (UF, repetível)
    #[arg(long)]
    uf: Vec<String>,

    /// Município (repetível)
    #[arg(long)]
    municipio: Vec<String>,

    /// Bairro (repetível)
    #[arg(long)]
    bairro: Vec<String>,

    /// CEP com 8 dígitos (repetível)
    #[arg(long)]
    cep: Vec<String>,

    /// DDD com 2 dígitos (repetível)
    #[arg(long)]
    ddd: Vec<String>,

    /// Data de abertura a partir de (aaaa-mm-dd)
    #[arg(long)]
    abertura_de: Option<NaiveDate>,

    /// Data de abertura até (aaaa-mm-dd)
    #[arg(long)]
    abertura_ate: Option<NaiveDate>,

    /// Capital social mínimo (formato brasileiro, ex.: 1.500,50)
    #[arg(long)]
    capital_de: Option<String>,

    /// Capital social máximo (formato brasileiro)
    #[arg(long)]
    capital_ate: Option<String>,

    #[arg(long)]
    somente_mei: bool,
    #[arg(long)]
    excluir_mei: bool,
    #[arg(long)]
    somente_matriz: bool,
    #[arg(long)]
    somente_filial: bool,
    #[arg(long)]
    com_telefone: bool,
    #[arg(long)]
    somente_fixo: bool,
    #[arg(long)]
    somente_celular: bool,
    #[arg(long)]
    com_email: bool,

    /// Quantidade de registros
    #[arg(long, default_value = "50")]
    limite: String,

    /// Nível de detalhe: simples ou completo
    #[arg(long, default_value = "simples")]
    tipo_resultado: String,
}

impl ArgsFiltros {
    fn em_filtros(&self) -> Result<FiltrosPesquisa> {
        let mut filtros = FiltrosPesquisa::default();
        filtros.razao_social = self.razao_social.clone().unwrap_or_default();

        let listas: [(CampoLista, &Vec<String>); 7] = [
            (CampoLista::AtividadePrincipal, &self.atividade_principal),
            (CampoLista::NaturezaJuridica, &self.natureza_juridica),
            (CampoLista::Uf, &self.uf),
            (CampoLista::Municipio, &self.municipio),
            (CampoLista::Bairro, &self.bairro),
            (CampoLista::Cep, &self.cep),
            (CampoLista::Ddd, &self.ddd),
        ];
        for (campo, valores) in listas {
            for valor in valores {
                filtros.adicionar_item(campo, valor)?;
            }
        }

        filtros.situacao_cadastral = self.situacao.as_deref().map(str::parse).transpose()?;
        filtros.abertura_de = self.abertura_de;
        filtros.abertura_ate = self.abertura_ate;
        filtros.capital_de = self.capital_de.clone().unwrap_or_default();
        filtros.capital_ate = self.capital_ate.clone().unwrap_or_default();
        filtros.somente_mei = self.somente_mei;
        filtros.excluir_mei = self.excluir_mei;
        filtros.somente_matriz = self.somente_matriz;
        filtros.somente_filial = self.somente_filial;
        filtros.com_telefone = self.com_telefone;
        filtros.somente_fixo = self.somente_fixo;
        filtros.somente_celular = self.somente_celular;
        filtros.com_email = self.com_email;
        filtros.limite = self.limite.clone();
        filtros.tipo_resultado = self.tipo_resultado.parse()?;
        Ok(filtros)
    }
}

#[derive(Args)]
struct ArgsPesquisar {
    #[command(flatten)]
    filtros: ArgsFiltros,

    /// Pula o diálogo de confirmação
    #[arg(long)]
    sim: bool,
}

#[derive(Args)]
struct ArgsEnviarEmail {
    #[command(flatten)]
    filtros: ArgsFiltros,

    /// Nome do arquivo gerado
    #[arg(long)]
    nome: String,

    /// E-mail de destino (repetível)
    #[arg(long = "para", required = true)]
    enviar_para: Vec<String>,

    /// Formato do arquivo: csv ou xlsx
    #[arg(long, default_value = "csv")]
    formato: String,
}

#[derive(Args)]
struct ArgsSugestoes {
    /// Tipo: empresas, cnae ou natureza-juridica
    tipo: String,

    /// Texto da busca (omita para o modo interativo)
    consulta: Option<String>,
}

#[derive(Args)]
struct ArgsDocumentos {
    /// Restringe ao tipo "mei" ou "cnpj"
    #[arg(long)]
    tipo: Option<String>,
}

#[derive(Args)]
struct ArgsLogin {
    /// E-mail da conta
    #[arg(long)]
    email: String,
}

#[derive(Args)]
struct ArgsRecuperarSenha {
    /// E-mail da conta
    #[arg(long)]
    email: String,

    /// Token recebido por e-mail; quando presente, redefine a senha
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();

    let mut config = EnvironmentConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.com_base_url(url);
    }
    let contexto = AppContext::new(config)?;

    match cli.comando {
        Comando::Pesquisar(args) => pesquisar(&contexto, args).await,
        Comando::EnviarEmail(args) => enviar_email(&contexto, args).await,
        Comando::Sugestoes(args) => sugestoes(&contexto, args).await,
        Comando::Saldo => saldo(&contexto).await,
        Comando::Documentos(args) => documentos(&contexto, args).await,
        Comando::Sessao => sessao(&contexto).await,
        Comando::Login(args) => login(&contexto, args).await,
        Comando::Logout => logout(&contexto).await,
        Comando::RecuperarSenha(args) => recuperar_senha(&contexto, args).await,
    }
}

async fn pesquisar(contexto: &AppContext, args: ArgsPesquisar) -> Result<()> {
    let filtros = args.filtros.em_filtros()?;
    let mut fluxo = FluxoPesquisa::new(DocumentoService::new(contexto.cliente()));

    fluxo.submeter();
    if !args.sim {
        let confirmado = ui::confirmar(
            "Você deseja realizar a busca e download dos dados com os filtros selecionados?",
        )
        .await?;
        if !confirmado {
            fluxo.cancelar();
            println!("Busca cancelada.");
            return Ok(());
        }
    }

    info!("🔎 Consultando CNPJs...");
    fluxo.confirmar(&filtros).await;
    debug_assert_eq!(fluxo.estado(), EstadoFluxo::Ocioso);

    if let Some(aviso) = fluxo.ultimo_aviso() {
        ui::exibir_aviso(aviso);
    }
    if fluxo.resultados().is_empty() {
        ui::exibir_tabela(fluxo.resultados());
        return Ok(());
    }

    let mut paginacao = PaginacaoArquivos::new(
        fluxo.resultados().to_vec(),
        contexto.config.itens_por_pagina,
    );
    ui::paginar_interativo(&mut paginacao).await?;
    Ok(())
}

async fn enviar_email(contexto: &AppContext, args: ArgsEnviarEmail) -> Result<()> {
    let filtros = args.filtros.em_filtros()?;
    let formato: FormatoArquivo = args.formato.parse()?;
    let detalhes = DetalhesEnvio::novo(&args.nome, &args.enviar_para.join(","), formato)?;

    let mut fluxo = FluxoPesquisa::new(DocumentoService::new(contexto.cliente()));
    info!("📧 Pesquisando e enviando por e-mail...");
    fluxo.enviar_por_email(&filtros, &detalhes).await;

    if let Some(aviso) = fluxo.ultimo_aviso() {
        ui::exibir_aviso(aviso);
    }
    Ok(())
}

async fn sugestoes(contexto: &AppContext, args: ArgsSugestoes) -> Result<()> {
    let tipo: TipoSugestao = args.tipo.parse()?;

    if let Some(consulta) = args.consulta {
        let lista = contexto.sugestoes.buscar(tipo, &consulta).await?;
        if lista.is_empty() {
            println!("Nenhum resultado encontrado.");
        }
        for sugestao in lista {
            println!("  {} - {}", sugestao.id, sugestao.nome);
        }
        return Ok(());
    }

    let fonte = Arc::new(FonteSugestoes::new(contexto.sugestoes.clone(), tipo));
    let campo = CampoAutocompletar::new(fonte);
    sugestoes_interativo(&campo).await
}

/// Modo interativo: cada linha digitada alimenta o campo com debounce;
/// "!N" seleciona a sugestão N.
async fn sugestoes_interativo(campo: &CampoAutocompletar) -> Result<()> {
    use std::io::Write;
    use tokio::io::AsyncBufReadExt;

    println!("Digite para buscar; !N seleciona a sugestão N; linha vazia encerra.");
    campo.ao_focar();

    let mut linhas = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    print!("> ");
    std::io::stdout().flush()?;

    while let Some(linha) = linhas.next_line().await? {
        let linha = linha.trim();
        if linha.is_empty() {
            break;
        }

        if let Some(indice) = linha.strip_prefix('!') {
            let escolhida = indice
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| campo.estado().sugestoes.get(i).cloned());
            match escolhida {
                Some(sugestao) => {
                    let valor = campo.selecionar(&sugestao);
                    println!("Selecionado: {}", valor);
                    break;
                }
                None => println!("Sugestão inexistente."),
            }
        } else {
            campo.ao_digitar(linha);
            let mut observador = campo.observar();
            tokio::time::sleep(ATRASO_DIGITACAO + Duration::from_millis(50)).await;
            while campo.estado().carregando {
                observador.changed().await?;
            }
            let estado = campo.estado();
            if estado.sugestoes.is_empty() {
                println!("  Nenhum resultado encontrado.");
            }
            for (indice, sugestao) in estado.sugestoes.iter().enumerate() {
                println!("  {}. {}", indice + 1, sugestao.nome);
            }
        }

        print!("> ");
        std::io::stdout().flush()?;
    }

    campo.ao_desfocar();
    Ok(())
}

async fn saldo(contexto: &AppContext) -> Result<()> {
    let saldo = contexto.documentos.saldo().await?;
    println!("Saldo de consultas: {}", saldo);
    Ok(())
}

async fn documentos(contexto: &AppContext, args: ArgsDocumentos) -> Result<()> {
    contexto.atualizar().await;
    let usuario = contexto.usuario().await;
    let (acesso_mei, acesso_cnpj) = usuario
        .as_ref()
        .map(|usuario| (usuario.acesso_mei(), usuario.acesso_cnpj()))
        .unwrap_or((false, false));

    let documentos = contexto
        .documentos
        .documentos_do_usuario(acesso_mei, acesso_cnpj, args.tipo.as_deref())
        .await;
    ui::exibir_tabela(&documentos);
    Ok(())
}

async fn sessao(contexto: &AppContext) -> Result<()> {
    contexto.atualizar().await;
    match contexto.usuario().await {
        Some(usuario) => {
            println!("Sessão ativa: {} <{}>", usuario.nome, usuario.email);
            if let Some(saldo) = contexto.saldo().await {
                println!("Saldo de consultas: {}", saldo);
            }
        }
        None => println!("Nenhuma sessão ativa."),
    }
    Ok(())
}

async fn login(contexto: &AppContext, args: ArgsLogin) -> Result<()> {
    let senha = ui::perguntar("Senha").await?;
    contexto.entrar(&args.email, &senha).await?;
    match contexto.usuario().await {
        Some(usuario) => println!("Autenticação realizada com sucesso! Bem-vindo, {}.", usuario.nome),
        None => println!("Login aceito, mas a sessão não foi confirmada."),
    }
    Ok(())
}

async fn logout(contexto: &AppContext) -> Result<()> {
    contexto.sair().await;
    println!("Sessão encerrada.");
    Ok(())
}

async fn recuperar_senha(contexto: &AppContext, args: ArgsRecuperarSenha) -> Result<()> {
    match args.token {
        Some(token) => {
            let nova_senha = ui::perguntar("Nova senha").await?;
            contexto
                .auth
                .redefinir_senha(&args.email, &nova_senha, &token)
                .await?;
            println!("Senha redefinida com sucesso.");
        }
        None => {
            contexto.auth.solicitar_recuperacao(&args.email).await?;
            println!("As instruções de recuperação foram enviadas para o e-mail informado.");
        }
    }
    Ok(())
}
