//! Contexto da aplicação
//!
//! Construído uma vez na inicialização e passado por referência a quem
//! precisar; guarda a sessão e o saldo atrás de RwLock, com uma operação
//! explícita de atualização em vez de estado global ambiente.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::client::ApiClient;
use crate::config::EnvironmentConfig;
use crate::models::usuario::Usuario;
use crate::services::auth_service::AuthService;
use crate::services::documento_service::DocumentoService;
use crate::services::sugestao_service::SugestaoService;
use crate::utils::errors::AppResult;

/// Contexto compartilhado do cliente
pub struct AppContext {
    pub config: EnvironmentConfig,
    pub documentos: DocumentoService,
    pub sugestoes: Arc<SugestaoService>,
    pub auth: AuthService,
    client: Arc<ApiClient>,
    sessao: RwLock<Option<Usuario>>,
    saldo: RwLock<Option<f64>>,
}

impl AppContext {
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let client = Arc::new(ApiClient::new(&config)?);
        Ok(Self {
            documentos: DocumentoService::new(client.clone()),
            sugestoes: Arc::new(SugestaoService::new(client.clone())),
            auth: AuthService::new(client.clone()),
            client,
            config,
            sessao: RwLock::new(None),
            saldo: RwLock::new(None),
        })
    }

    /// Cliente HTTP compartilhado, para montar serviços avulsos.
    pub fn cliente(&self) -> Arc<ApiClient> {
        self.client.clone()
    }

    /// Revalida a sessão no servidor e recarrega o saldo quando
    /// autenticado. Falha ao buscar o saldo zera o valor em vez de derrubar
    /// a operação.
    pub async fn atualizar(&self) {
        let resposta = self.auth.verificar_sessao().await;
        let autenticado = resposta.authenticated;
        let usuario = if autenticado { resposta.user_data } else { None };

        *self.sessao.write().await = usuario;

        if autenticado {
            match self.documentos.saldo().await {
                Ok(valor) => *self.saldo.write().await = Some(valor),
                Err(erro) => {
                    log::error!("❌ Falha ao buscar saldo: {}", erro);
                    *self.saldo.write().await = Some(0.0);
                }
            }
        } else {
            *self.saldo.write().await = None;
        }
    }

    /// Autentica e sincroniza sessão e saldo.
    pub async fn entrar(&self, email: &str, senha: &str) -> AppResult<()> {
        self.auth.login(email, senha).await?;
        self.atualizar().await;
        Ok(())
    }

    /// Encerra a sessão; falha no servidor não impede a limpeza local.
    pub async fn sair(&self) {
        if let Err(erro) = self.auth.logout().await {
            log::warn!("Logout no servidor falhou; encerrando a sessão local: {}", erro);
        }
        *self.sessao.write().await = None;
        *self.saldo.write().await = None;
    }

    pub async fn usuario(&self) -> Option<Usuario> {
        self.sessao.read().await.clone()
    }

    pub async fn saldo(&self) -> Option<f64> {
        *self.saldo.read().await
    }
}
