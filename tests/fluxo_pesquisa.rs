//! Cenários de ponta a ponta do fluxo de pesquisa, com a API substituída
//! por uma implementação em memória que captura os payloads enviados.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use lead_extraction::dto::consulta_dto::ConsultaPayload;
use lead_extraction::dto::email_dto::{DetalhesEnvio, EnvioEmailPayload, FormatoArquivo};
use lead_extraction::models::filtros::{CampoLista, FiltrosPesquisa, TipoResultado};
use lead_extraction::models::registro::{CnpjBruto, DadosResposta, RespostaConsulta, NOME_NAO_INFORMADO};
use lead_extraction::services::documento_service::ApiCnpj;
use lead_extraction::services::extracao_service::{EstadoFluxo, FluxoPesquisa, VarianteAviso};
use lead_extraction::utils::errors::{AppError, AppResult};

#[derive(Default)]
struct ApiCapturando {
    consultas: Mutex<Vec<(serde_json::Value, TipoResultado)>>,
    emails: Mutex<Vec<serde_json::Value>>,
    cnpjs: Vec<CnpjBruto>,
}

#[async_trait]
impl ApiCnpj for ApiCapturando {
    async fn iniciar_consulta(
        &self,
        payload: &ConsultaPayload,
        tipo: TipoResultado,
    ) -> AppResult<RespostaConsulta> {
        let corpo = serde_json::to_value(payload).expect("payload serializável");
        self.consultas.lock().unwrap().push((corpo, tipo));
        Ok(RespostaConsulta {
            response_data: Some(DadosResposta {
                cnpjs: self.cnpjs.clone(),
            }),
        })
    }

    async fn consultar_e_enviar_email(
        &self,
        payload: &EnvioEmailPayload,
        _tipo: TipoResultado,
    ) -> AppResult<()> {
        let corpo = serde_json::to_value(payload).expect("payload serializável");
        self.emails.lock().unwrap().push(corpo);
        Ok(())
    }
}

struct ApiRecusando;

#[async_trait]
impl ApiCnpj for ApiRecusando {
    async fn iniciar_consulta(
        &self,
        _payload: &ConsultaPayload,
        _tipo: TipoResultado,
    ) -> AppResult<RespostaConsulta> {
        Err(AppError::Api {
            status: 402,
            mensagem: "Créditos esgotados".to_string(),
        })
    }

    async fn consultar_e_enviar_email(
        &self,
        _payload: &EnvioEmailPayload,
        _tipo: TipoResultado,
    ) -> AppResult<()> {
        unreachable!("não usado neste teste")
    }
}

fn filtros_acme_sp() -> FiltrosPesquisa {
    let mut filtros = FiltrosPesquisa {
        razao_social: "Acme".to_string(),
        ..FiltrosPesquisa::default()
    };
    filtros
        .adicionar_item(CampoLista::Uf, "SP")
        .expect("UF válida");
    filtros
}

#[tokio::test]
async fn pesquisa_acme_sp_monta_payload_esparso() {
    let api = Arc::new(ApiCapturando::default());
    let mut fluxo = FluxoPesquisa::new(api.clone());
    let filtros = filtros_acme_sp();

    assert!(fluxo.submeter());
    fluxo.confirmar(&filtros).await;

    let consultas = api.consultas.lock().unwrap();
    assert_eq!(consultas.len(), 1);
    let (corpo, tipo) = &consultas[0];
    assert_eq!(*tipo, TipoResultado::Simples);

    let mut chaves: Vec<&str> = corpo.as_object().unwrap().keys().map(String::as_str).collect();
    chaves.sort_unstable();
    assert_eq!(
        chaves,
        vec!["busca_textual", "limite", "mais_filtros", "mei", "pagina", "uf"]
    );

    assert_eq!(corpo["pagina"], 0);
    assert_eq!(corpo["limite"], 50);
    assert_eq!(corpo["uf"], serde_json::json!(["SP"]));

    let clausula = &corpo["busca_textual"][0];
    assert_eq!(clausula["texto"], serde_json::json!(["Acme"]));
    assert_eq!(clausula["tipo_busca"], "CONTEM");
    assert_eq!(clausula["razao_social"], true);
    assert_eq!(clausula["nome_fantasia"], true);
    assert_eq!(clausula["nome_socio"], false);
}

#[tokio::test]
async fn pesquisa_sem_resultados_avisa_zero_e_tabela_fica_vazia() {
    let api = Arc::new(ApiCapturando::default());
    let mut fluxo = FluxoPesquisa::new(api);

    fluxo.submeter();
    fluxo.confirmar(&FiltrosPesquisa::default()).await;

    assert_eq!(fluxo.estado(), EstadoFluxo::Ocioso);
    assert!(fluxo.resultados().is_empty());
    let aviso = fluxo.ultimo_aviso().expect("aviso de conclusão");
    assert!(aviso.descricao.starts_with("0 resultados"));
}

#[tokio::test]
async fn registros_sem_razao_social_ganham_fallback() {
    let api = Arc::new(ApiCapturando {
        cnpjs: vec![
            CnpjBruto {
                cnpj: "11222333000181".to_string(),
                data_abertura: Some("2019-10-02".to_string()),
                ..CnpjBruto::default()
            },
            CnpjBruto {
                cnpj: "99888777000166".to_string(),
                razao_social: Some("Acme Ltda".to_string()),
                ..CnpjBruto::default()
            },
        ],
        ..ApiCapturando::default()
    });
    let mut fluxo = FluxoPesquisa::new(api);

    fluxo.submeter();
    fluxo.confirmar(&FiltrosPesquisa::default()).await;

    let resultados = fluxo.resultados();
    assert_eq!(resultados.len(), 2);
    assert_eq!(resultados[0].nome, NOME_NAO_INFORMADO);
    assert_eq!(resultados[0].data, "02/10/2019");
    assert_eq!(resultados[1].nome, "Acme Ltda");
    assert_eq!(resultados[1].data, "-");
}

#[tokio::test]
async fn resultado_completo_carrega_os_detalhes_do_registro() {
    let bruto: CnpjBruto = serde_json::from_value(serde_json::json!({
        "cnpj": "11222333000181",
        "razao_social": "Acme Ltda",
        "data_abertura": "2019-10-02",
        "nome_fantasia": "Acme",
        "situacao_cadastral": { "situacao_atual": "ATIVA" },
        "endereco": { "municipio": "São Paulo", "uf": "SP" }
    }))
    .expect("registro completo válido");
    let api = Arc::new(ApiCapturando {
        cnpjs: vec![bruto],
        ..ApiCapturando::default()
    });
    let mut fluxo = FluxoPesquisa::new(api);

    let mut filtros = filtros_acme_sp();
    filtros.tipo_resultado = TipoResultado::Completo;
    fluxo.submeter();
    fluxo.confirmar(&filtros).await;

    let resultados = fluxo.resultados();
    assert_eq!(resultados.len(), 1);
    assert_eq!(resultados[0].detalhes["nome_fantasia"], "Acme");
    assert_eq!(
        resultados[0].detalhes["situacao_cadastral"]["situacao_atual"],
        "ATIVA"
    );
}

#[tokio::test]
async fn consulta_recusada_mostra_mensagem_do_backend() {
    let mut fluxo = FluxoPesquisa::new(ApiRecusando);

    fluxo.submeter();
    fluxo.confirmar(&FiltrosPesquisa::default()).await;

    assert_eq!(fluxo.estado(), EstadoFluxo::Ocioso);
    assert!(fluxo.resultados().is_empty());
    let aviso = fluxo.ultimo_aviso().expect("aviso de erro");
    assert_eq!(aviso.variante, VarianteAviso::Destrutiva);
    assert_eq!(aviso.descricao, "Erro: Créditos esgotados");
}

#[tokio::test]
async fn envio_por_email_carrega_a_pesquisa_no_envelope() {
    let api = Arc::new(ApiCapturando::default());
    let mut fluxo = FluxoPesquisa::new(api.clone());

    let mut filtros = filtros_acme_sp();
    filtros.limite = "120".to_string();
    filtros.tipo_resultado = TipoResultado::Completo;
    let detalhes = DetalhesEnvio::novo(
        "Clientes de São Paulo",
        "vendas@exemplo.com, diretoria@exemplo.com",
        FormatoArquivo::Xlsx,
    )
    .expect("detalhes válidos");

    fluxo.enviar_por_email(&filtros, &detalhes).await;

    assert!(fluxo.resultados().is_empty());
    let emails = api.emails.lock().unwrap();
    assert_eq!(emails.len(), 1);
    let corpo = &emails[0];
    assert_eq!(corpo["nome"], "Clientes de São Paulo");
    assert_eq!(corpo["tipo"], "xlsx");
    assert_eq!(corpo["total_linhas"], 120);
    assert_eq!(
        corpo["enviar_para"],
        serde_json::json!(["vendas@exemplo.com", "diretoria@exemplo.com"])
    );
    assert_eq!(corpo["pesquisa"]["limite"], 120);
    assert_eq!(corpo["pesquisa"]["pagina"], 0);
    assert_eq!(corpo["pesquisa"]["uf"], serde_json::json!(["SP"]));
}
