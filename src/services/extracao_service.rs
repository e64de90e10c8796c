//! Fluxo de submissão da pesquisa
//!
//! Máquina de estados do formulário de extração: ocioso, aguardando a
//! confirmação do usuário, pesquisando e enviando por e-mail. O envio por
//! e-mail nunca alimenta a tabela de resultados; o arquivo chega fora da
//! aplicação.

use crate::dto::consulta_dto::ConsultaPayload;
use crate::dto::email_dto::{DetalhesEnvio, EnvioEmailPayload};
use crate::models::filtros::FiltrosPesquisa;
use crate::models::registro::RegistroArquivo;
use crate::services::documento_service::ApiCnpj;

/// Estados do fluxo de pesquisa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EstadoFluxo {
    #[default]
    Ocioso,
    AguardandoConfirmacao,
    Pesquisando,
    EnviandoEmail,
}

/// Variante visual do aviso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianteAviso {
    Normal,
    Destrutiva,
}

/// Aviso apresentado ao usuário ao fim de uma operação (o "toast").
#[derive(Debug, Clone, PartialEq)]
pub struct Aviso {
    pub titulo: String,
    pub descricao: String,
    pub variante: VarianteAviso,
}

impl Aviso {
    fn normal(titulo: &str, descricao: String) -> Self {
        Self {
            titulo: titulo.to_string(),
            descricao,
            variante: VarianteAviso::Normal,
        }
    }

    fn destrutivo(titulo: &str, descricao: String) -> Self {
        Self {
            titulo: titulo.to_string(),
            descricao,
            variante: VarianteAviso::Destrutiva,
        }
    }
}

/// Máquina de estados da pesquisa de CNPJs
pub struct FluxoPesquisa<A: ApiCnpj> {
    api: A,
    estado: EstadoFluxo,
    resultados: Vec<RegistroArquivo>,
    avisos: Vec<Aviso>,
}

impl<A: ApiCnpj> FluxoPesquisa<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            estado: EstadoFluxo::Ocioso,
            resultados: Vec::new(),
            avisos: Vec::new(),
        }
    }

    pub fn estado(&self) -> EstadoFluxo {
        self.estado
    }

    pub fn resultados(&self) -> &[RegistroArquivo] {
        &self.resultados
    }

    pub fn ultimo_aviso(&self) -> Option<&Aviso> {
        self.avisos.last()
    }

    pub fn avisos(&self) -> &[Aviso] {
        &self.avisos
    }

    /// Equivalente ao botão desabilitado durante uma operação em andamento.
    pub fn ocupado(&self) -> bool {
        matches!(
            self.estado,
            EstadoFluxo::Pesquisando | EstadoFluxo::EnviandoEmail
        )
    }

    /// Submete o formulário: abre a confirmação se o fluxo estiver ocioso.
    pub fn submeter(&mut self) -> bool {
        if self.estado != EstadoFluxo::Ocioso {
            return false;
        }
        self.estado = EstadoFluxo::AguardandoConfirmacao;
        true
    }

    /// Usuário desistiu na confirmação.
    pub fn cancelar(&mut self) {
        if self.estado == EstadoFluxo::AguardandoConfirmacao {
            self.estado = EstadoFluxo::Ocioso;
        }
    }

    /// Usuário confirmou: dispara a consulta e volta a ocioso ao final,
    /// com sucesso ou falha.
    pub async fn confirmar(&mut self, filtros: &FiltrosPesquisa) {
        if self.estado != EstadoFluxo::AguardandoConfirmacao {
            return;
        }
        self.estado = EstadoFluxo::Pesquisando;

        let payload = ConsultaPayload::montar(filtros);
        match self
            .api
            .iniciar_consulta(&payload, filtros.tipo_resultado)
            .await
        {
            Ok(resposta) => {
                let registros: Vec<RegistroArquivo> = resposta
                    .cnpjs()
                    .into_iter()
                    .map(RegistroArquivo::from)
                    .collect();
                self.avisos.push(Aviso::normal(
                    "Busca concluída!",
                    format!("{} resultados foram encontrados.", registros.len()),
                ));
                self.resultados = registros;
            }
            Err(erro) => {
                log::error!("❌ Erro na consulta de CNPJs: {}", erro);
                self.avisos.push(Aviso::destrutivo(
                    "Erro ao iniciar a busca",
                    format!("Erro: {}", erro.mensagem_usuario()),
                ));
                self.resultados = Vec::new();
            }
        }

        self.estado = EstadoFluxo::Ocioso;
    }

    /// Pesquisa com entrega por e-mail; os resultados chegam fora da
    /// aplicação, então a tabela é esvaziada ao final, com sucesso ou falha.
    pub async fn enviar_por_email(&mut self, filtros: &FiltrosPesquisa, detalhes: &DetalhesEnvio) {
        if self.estado != EstadoFluxo::Ocioso {
            return;
        }
        self.estado = EstadoFluxo::EnviandoEmail;

        let payload = EnvioEmailPayload::montar(filtros, detalhes);
        match self
            .api
            .consultar_e_enviar_email(&payload, filtros.tipo_resultado)
            .await
        {
            Ok(()) => {
                self.avisos.push(Aviso::normal(
                    "Busca e envio de e-mail iniciados!",
                    "Os resultados serão enviados para os e-mails informados.".to_string(),
                ));
            }
            Err(erro) => {
                log::error!("❌ Erro no envio por e-mail: {}", erro);
                self.avisos.push(Aviso::destrutivo(
                    "Erro ao enviar por e-mail",
                    format!("Erro: {}", erro.mensagem_usuario()),
                ));
            }
        }

        self.resultados = Vec::new();
        self.estado = EstadoFluxo::Ocioso;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::models::registro::{CnpjBruto, DadosResposta, RespostaConsulta};
    use crate::models::TipoResultado;
    use crate::utils::errors::{AppError, AppResult};

    struct ApiFixa {
        cnpjs: Vec<CnpjBruto>,
        chamadas: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ApiCnpj for ApiFixa {
        async fn iniciar_consulta(
            &self,
            _payload: &ConsultaPayload,
            _tipo: TipoResultado,
        ) -> AppResult<RespostaConsulta> {
            self.chamadas.fetch_add(1, Ordering::SeqCst);
            Ok(RespostaConsulta {
                response_data: Some(DadosResposta {
                    cnpjs: self.cnpjs.clone(),
                }),
            })
        }

        async fn consultar_e_enviar_email(
            &self,
            _payload: &EnvioEmailPayload,
            _tipo: TipoResultado,
        ) -> AppResult<()> {
            self.chamadas.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct ApiComFalha;

    #[async_trait]
    impl ApiCnpj for ApiComFalha {
        async fn iniciar_consulta(
            &self,
            _payload: &ConsultaPayload,
            _tipo: TipoResultado,
        ) -> AppResult<RespostaConsulta> {
            Err(AppError::Api {
                status: 402,
                mensagem: "Saldo insuficiente".to_string(),
            })
        }

        async fn consultar_e_enviar_email(
            &self,
            _payload: &EnvioEmailPayload,
            _tipo: TipoResultado,
        ) -> AppResult<()> {
            Err(AppError::Api {
                status: 500,
                mensagem: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn cancelar_volta_a_ocioso_sem_consultar() {
        let chamadas = Arc::new(AtomicUsize::new(0));
        let mut fluxo = FluxoPesquisa::new(ApiFixa {
            cnpjs: Vec::new(),
            chamadas: chamadas.clone(),
        });

        assert!(fluxo.submeter());
        assert_eq!(fluxo.estado(), EstadoFluxo::AguardandoConfirmacao);
        fluxo.cancelar();
        assert_eq!(fluxo.estado(), EstadoFluxo::Ocioso);
        assert_eq!(chamadas.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submeter_duas_vezes_nao_reabre_confirmacao() {
        let mut fluxo = FluxoPesquisa::new(ApiFixa {
            cnpjs: Vec::new(),
            chamadas: Arc::new(AtomicUsize::new(0)),
        });
        assert!(fluxo.submeter());
        assert!(!fluxo.submeter());
    }

    #[tokio::test]
    async fn busca_sem_resultados_avisa_zero() {
        let mut fluxo = FluxoPesquisa::new(ApiFixa {
            cnpjs: Vec::new(),
            chamadas: Arc::new(AtomicUsize::new(0)),
        });
        let filtros = FiltrosPesquisa::default();

        fluxo.submeter();
        fluxo.confirmar(&filtros).await;

        assert_eq!(fluxo.estado(), EstadoFluxo::Ocioso);
        assert!(fluxo.resultados().is_empty());
        let aviso = fluxo.ultimo_aviso().expect("aviso emitido");
        assert_eq!(aviso.titulo, "Busca concluída!");
        assert_eq!(aviso.descricao, "0 resultados foram encontrados.");
    }

    #[tokio::test]
    async fn falha_da_consulta_esvazia_resultados_e_usa_mensagem_do_backend() {
        let mut fluxo = FluxoPesquisa::new(ApiComFalha);
        let filtros = FiltrosPesquisa::default();

        fluxo.submeter();
        fluxo.confirmar(&filtros).await;

        assert_eq!(fluxo.estado(), EstadoFluxo::Ocioso);
        assert!(fluxo.resultados().is_empty());
        let aviso = fluxo.ultimo_aviso().expect("aviso emitido");
        assert_eq!(aviso.variante, VarianteAviso::Destrutiva);
        assert_eq!(aviso.descricao, "Erro: Saldo insuficiente");
    }

    #[tokio::test]
    async fn envio_por_email_esvazia_resultados_no_sucesso() {
        let chamadas = Arc::new(AtomicUsize::new(0));
        let mut fluxo = FluxoPesquisa::new(ApiFixa {
            cnpjs: vec![CnpjBruto {
                cnpj: "11222333000181".to_string(),
                razao_social: Some("Acme Ltda".to_string()),
                ..CnpjBruto::default()
            }],
            chamadas,
        });
        let filtros = FiltrosPesquisa::default();

        fluxo.submeter();
        fluxo.confirmar(&filtros).await;
        assert_eq!(fluxo.resultados().len(), 1);

        let detalhes = DetalhesEnvio::novo(
            "Extração",
            "a@exemplo.com",
            crate::dto::email_dto::FormatoArquivo::Csv,
        )
        .unwrap();
        fluxo.enviar_por_email(&filtros, &detalhes).await;

        assert_eq!(fluxo.estado(), EstadoFluxo::Ocioso);
        assert!(fluxo.resultados().is_empty());
        assert_eq!(
            fluxo.ultimo_aviso().unwrap().titulo,
            "Busca e envio de e-mail iniciados!"
        );
    }

    #[tokio::test]
    async fn falha_do_envio_usa_mensagem_generica() {
        let mut fluxo = FluxoPesquisa::new(ApiComFalha);
        let filtros = FiltrosPesquisa::default();
        let detalhes = DetalhesEnvio::novo(
            "Extração",
            "a@exemplo.com",
            crate::dto::email_dto::FormatoArquivo::Csv,
        )
        .unwrap();

        fluxo.enviar_por_email(&filtros, &detalhes).await;

        let aviso = fluxo.ultimo_aviso().expect("aviso emitido");
        assert_eq!(aviso.titulo, "Erro ao enviar por e-mail");
        assert_eq!(
            aviso.descricao,
            "Erro: Não foi possível processar sua solicitação."
        );
    }

    struct ApiEnvioRecusado {
        cnpjs: Vec<CnpjBruto>,
    }

    #[async_trait]
    impl ApiCnpj for ApiEnvioRecusado {
        async fn iniciar_consulta(
            &self,
            _payload: &ConsultaPayload,
            _tipo: TipoResultado,
        ) -> AppResult<RespostaConsulta> {
            Ok(RespostaConsulta {
                response_data: Some(DadosResposta {
                    cnpjs: self.cnpjs.clone(),
                }),
            })
        }

        async fn consultar_e_enviar_email(
            &self,
            _payload: &EnvioEmailPayload,
            _tipo: TipoResultado,
        ) -> AppResult<()> {
            Err(AppError::Api {
                status: 500,
                mensagem: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn envio_por_email_esvazia_resultados_tambem_na_falha() {
        let mut fluxo = FluxoPesquisa::new(ApiEnvioRecusado {
            cnpjs: vec![CnpjBruto {
                cnpj: "11222333000181".to_string(),
                ..CnpjBruto::default()
            }],
        });
        let filtros = FiltrosPesquisa::default();

        fluxo.submeter();
        fluxo.confirmar(&filtros).await;
        assert_eq!(fluxo.resultados().len(), 1);

        let detalhes = DetalhesEnvio::novo(
            "Extração",
            "a@exemplo.com",
            crate::dto::email_dto::FormatoArquivo::Csv,
        )
        .unwrap();
        fluxo.enviar_por_email(&filtros, &detalhes).await;

        assert_eq!(fluxo.estado(), EstadoFluxo::Ocioso);
        assert!(fluxo.resultados().is_empty());
    }
}
