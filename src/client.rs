//! Cliente HTTP da API de consulta
//!
//! Este módulo encapsula o reqwest com a sessão por cookies, o token de
//! acesso opcional como fallback e a extração da mensagem de erro que o
//! backend devolve no corpo.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

/// Cliente HTTP com sessão por cookies e token bearer opcional
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &EnvironmentConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.access_token.clone(),
        })
    }

    fn url(&self, caminho: &str) -> String {
        format!("{}{}", self.base_url, caminho)
    }

    fn preparar(&self, requisicao: RequestBuilder) -> RequestBuilder {
        let requisicao = requisicao.header("Accept", "application/json");
        match &self.token {
            Some(token) => requisicao.bearer_auth(token),
            None => requisicao,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, caminho: &str) -> AppResult<T> {
        log::debug!("➡️ GET {}", caminho);
        let resposta = self.preparar(self.http.get(self.url(caminho))).send().await?;
        let resposta = Self::exigir_sucesso(caminho, resposta).await?;
        Ok(resposta.json().await?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        caminho: &str,
        corpo: &B,
    ) -> AppResult<T> {
        log::debug!("➡️ POST {}", caminho);
        let resposta = self
            .preparar(self.http.post(self.url(caminho)).json(corpo))
            .send()
            .await?;
        let resposta = Self::exigir_sucesso(caminho, resposta).await?;
        Ok(resposta.json().await?)
    }

    /// POST em que o corpo da resposta não interessa (ex.: envio por e-mail).
    pub async fn post_vazio<B: Serialize + ?Sized>(&self, caminho: &str, corpo: &B) -> AppResult<()> {
        log::debug!("➡️ POST {}", caminho);
        let resposta = self
            .preparar(self.http.post(self.url(caminho)).json(corpo))
            .send()
            .await?;
        Self::exigir_sucesso(caminho, resposta).await?;
        Ok(())
    }

    async fn exigir_sucesso(caminho: &str, resposta: Response) -> AppResult<Response> {
        let status = resposta.status();
        log::debug!("⬅️ {} {}", status.as_u16(), caminho);

        if status.is_success() {
            return Ok(resposta);
        }

        let texto = resposta.text().await.unwrap_or_default();
        // O backend devolve a causa em `message`; sem ela a camada de erro
        // usa a mensagem genérica.
        let mensagem = serde_json::from_str::<serde_json::Value>(&texto)
            .ok()
            .and_then(|corpo| {
                corpo
                    .get("message")
                    .and_then(|mensagem| mensagem.as_str())
                    .map(String::from)
            })
            .unwrap_or_default();
        log::error!("❌ {} falhou com status {}: {}", caminho, status, mensagem);
        Err(AppError::Api {
            status: status.as_u16(),
            mensagem,
        })
    }
}
