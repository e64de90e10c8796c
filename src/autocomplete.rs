//! Campo de autocomplete com debounce
//!
//! Este módulo reage à digitação do usuário: espera a pausa de 300 ms antes
//! de consultar a fonte de sugestões e descarta respostas que chegam depois
//! de uma edição mais nova. A corrida entre respostas é resolvida por um
//! número de sequência comparado no momento da resolução, não pelo timing
//! dos timers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::models::sugestao::Sugestao;
use crate::services::sugestao_service::{SugestaoService, TipoSugestao};
use crate::utils::errors::AppResult;

/// Pausa de digitação antes de consultar a fonte.
pub const ATRASO_DIGITACAO: Duration = Duration::from_millis(300);

/// Carência após o desfoque, para a seleção por clique registrar antes do
/// painel fechar.
pub const CARENCIA_DESFOQUE: Duration = Duration::from_millis(200);

/// Fonte de sugestões consultada após o debounce.
#[async_trait]
pub trait BuscaSugestoes: Send + Sync + 'static {
    async fn buscar(&self, consulta: &str) -> AppResult<Vec<Sugestao>>;
}

/// Adaptador do serviço de sugestões para um tipo fixo.
pub struct FonteSugestoes {
    servico: Arc<SugestaoService>,
    tipo: TipoSugestao,
}

impl FonteSugestoes {
    pub fn new(servico: Arc<SugestaoService>, tipo: TipoSugestao) -> Self {
        Self { servico, tipo }
    }
}

#[async_trait]
impl BuscaSugestoes for FonteSugestoes {
    async fn buscar(&self, consulta: &str) -> AppResult<Vec<Sugestao>> {
        self.servico.buscar(self.tipo, consulta).await
    }
}

/// Estado observável do campo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstadoCampo {
    pub valor: String,
    pub sugestoes: Vec<Sugestao>,
    pub carregando: bool,
    pub painel_aberto: bool,
}

/// Campo de texto com sugestões debounced
pub struct CampoAutocompletar {
    fonte: Arc<dyn BuscaSugestoes>,
    sequencia: Arc<AtomicU64>,
    foco: Arc<AtomicU64>,
    tx: Arc<watch::Sender<EstadoCampo>>,
}

impl CampoAutocompletar {
    pub fn new(fonte: Arc<dyn BuscaSugestoes>) -> Self {
        let (tx, _rx) = watch::channel(EstadoCampo::default());
        Self {
            fonte,
            sequencia: Arc::new(AtomicU64::new(0)),
            foco: Arc::new(AtomicU64::new(0)),
            tx: Arc::new(tx),
        }
    }

    /// Cópia do estado atual do campo.
    pub fn estado(&self) -> EstadoCampo {
        self.tx.borrow().clone()
    }

    /// Receptor para acompanhar as mudanças do campo.
    pub fn observar(&self) -> watch::Receiver<EstadoCampo> {
        self.tx.subscribe()
    }

    /// Registra uma edição. Cada edição invalida o disparo anterior;
    /// somente a última, passada a pausa de digitação, consulta a fonte.
    pub fn ao_digitar(&self, texto: &str) {
        let minha_vez = self.sequencia.fetch_add(1, Ordering::SeqCst) + 1;
        let texto = texto.to_string();
        self.tx.send_modify(|estado| estado.valor = texto.clone());

        if texto.is_empty() {
            self.tx.send_modify(|estado| {
                estado.sugestoes.clear();
                estado.carregando = false;
            });
            return;
        }

        let fonte = self.fonte.clone();
        let sequencia = self.sequencia.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ATRASO_DIGITACAO).await;
            if sequencia.load(Ordering::SeqCst) != minha_vez {
                // uma edição mais nova cancelou este disparo
                return;
            }

            tx.send_modify(|estado| estado.carregando = true);
            let resultado = fonte.buscar(&texto).await;
            if sequencia.load(Ordering::SeqCst) != minha_vez {
                // resposta velha: outra busca já começou
                return;
            }

            tx.send_modify(|estado| {
                estado.sugestoes = match resultado {
                    Ok(lista) => lista,
                    Err(erro) => {
                        log::error!("❌ Falha ao buscar sugestões: {}", erro);
                        Vec::new()
                    }
                };
                estado.carregando = false;
            });
        });
    }

    /// Abre o painel de sugestões.
    pub fn ao_focar(&self) {
        self.foco.fetch_add(1, Ordering::SeqCst);
        self.tx.send_modify(|estado| estado.painel_aberto = true);
    }

    /// Agenda o fechamento do painel após a carência, a menos que o campo
    /// recupere o foco nesse intervalo.
    pub fn ao_desfocar(&self) {
        let minha_vez = self.foco.fetch_add(1, Ordering::SeqCst) + 1;
        let foco = self.foco.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(CARENCIA_DESFOQUE).await;
            if foco.load(Ordering::SeqCst) == minha_vez {
                tx.send_modify(|estado| estado.painel_aberto = false);
            }
        });
    }

    /// Escreve o rótulo da sugestão no campo e fecha o painel. Buscas
    /// pendentes são invalidadas para não repovoar a lista depois.
    pub fn selecionar(&self, sugestao: &Sugestao) -> String {
        self.sequencia.fetch_add(1, Ordering::SeqCst);
        self.tx.send_modify(|estado| {
            estado.valor = sugestao.nome.clone();
            estado.painel_aberto = false;
            estado.carregando = false;
        });
        sugestao.nome.clone()
    }
}
