//! Serviço de documentos e consulta de CNPJs
//!
//! Este módulo fala com os endpoints de consulta: disparo da pesquisa,
//! envio por e-mail, saldo e a lista de documentos gerados para o usuário.

use async_trait::async_trait;
use std::sync::Arc;

use crate::client::ApiClient;
use crate::dto::consulta_dto::ConsultaPayload;
use crate::dto::email_dto::EnvioEmailPayload;
use crate::models::filtros::TipoResultado;
use crate::models::registro::{DocumentoApi, RegistroArquivo, RespostaConsulta};
use crate::models::usuario::RespostaSaldo;
use crate::utils::errors::AppResult;

/// Operações de consulta usadas pelo fluxo de pesquisa.
///
/// O fluxo depende deste trait, não do cliente HTTP, para poder ser
/// exercitado com uma implementação em memória.
#[async_trait]
pub trait ApiCnpj: Send + Sync {
    async fn iniciar_consulta(
        &self,
        payload: &ConsultaPayload,
        tipo: TipoResultado,
    ) -> AppResult<RespostaConsulta>;

    async fn consultar_e_enviar_email(
        &self,
        payload: &EnvioEmailPayload,
        tipo: TipoResultado,
    ) -> AppResult<()>;
}

/// Serviço dos endpoints /cnpj-query e /user/documents
pub struct DocumentoService {
    client: Arc<ApiClient>,
}

impl DocumentoService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Saldo de consultas do usuário logado.
    pub async fn saldo(&self) -> AppResult<f64> {
        let resposta: RespostaSaldo = self.client.get_json("/cnpj-query/balance").await?;
        Ok(resposta.message.total_balance)
    }

    /// Documentos gerados para o usuário, filtrados pelo acesso do plano e
    /// por um tipo opcional. Erro de rede vira lista vazia para não derrubar
    /// a listagem.
    pub async fn documentos_do_usuario(
        &self,
        acesso_mei: bool,
        acesso_cnpj: bool,
        tipo: Option<&str>,
    ) -> Vec<RegistroArquivo> {
        let documentos: Vec<DocumentoApi> = match self.client.get_json("/user/documents").await {
            Ok(documentos) => documentos,
            Err(erro) => {
                log::error!("❌ Erro ao buscar documentos: {}", erro);
                return Vec::new();
            }
        };

        documentos
            .into_iter()
            .map(RegistroArquivo::from)
            .filter(|documento| {
                (acesso_mei && documento.tipo == "mei") || (acesso_cnpj && documento.tipo == "cnpj")
            })
            .filter(|documento| tipo.map_or(true, |tipo| documento.tipo == tipo))
            .collect()
    }
}

#[async_trait]
impl ApiCnpj for DocumentoService {
    async fn iniciar_consulta(
        &self,
        payload: &ConsultaPayload,
        tipo: TipoResultado,
    ) -> AppResult<RespostaConsulta> {
        self.client
            .post_json(&format!("/cnpj-query?resultType={}", tipo), payload)
            .await
    }

    async fn consultar_e_enviar_email(
        &self,
        payload: &EnvioEmailPayload,
        tipo: TipoResultado,
    ) -> AppResult<()> {
        self.client
            .post_vazio(&format!("/cnpj-query/send-email?resultType={}", tipo), payload)
            .await
    }
}

#[async_trait]
impl<T: ApiCnpj + ?Sized> ApiCnpj for Arc<T> {
    async fn iniciar_consulta(
        &self,
        payload: &ConsultaPayload,
        tipo: TipoResultado,
    ) -> AppResult<RespostaConsulta> {
        (**self).iniciar_consulta(payload, tipo).await
    }

    async fn consultar_e_enviar_email(
        &self,
        payload: &EnvioEmailPayload,
        tipo: TipoResultado,
    ) -> AppResult<()> {
        (**self).consultar_e_enviar_email(payload, tipo).await
    }
}
