#![allow(clippy::unwrap_used)]
// Integration tests for `ResourceStore` and `Farm` using wiremock.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Map, Value, json};
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use haras_api::models::Animal;
use haras_api::{
    ApiClient, LoginOutcome, MemorySessionStore, PersistedSession, ResourceClient, SessionHandle,
    SessionStore,
};
use haras_core::{
    CoreError, Farm, FetchOverrides, FilterSet, FilterValue, Navigation, Route, SelectOption,
    feedback,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn logged_in_store() -> Arc<MemorySessionStore> {
    let user = serde_json::from_value(json!({
        "ID": 7,
        "NOME_COMPLETO": "João Lima",
        "EMAIL": "joao@haras.com",
        "PERFIL": "USER"
    }))
    .unwrap();
    Arc::new(MemorySessionStore::with(PersistedSession {
        user: Some(user),
        access_token: Some("tok".into()),
        refresh_token: Some("ref".into()),
    }))
}

async fn setup_with(store: Arc<MemorySessionStore>) -> (MockServer, Farm) {
    let server = MockServer::start().await;
    let session = SessionHandle::bootstrap(store).unwrap();
    let api = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new(), session).unwrap();
    (server, Farm::from_client(api))
}

async fn setup() -> (MockServer, Farm) {
    setup_with(logged_in_store()).await
}

fn terreno(id: i64, nome: &str, status: &str) -> Value {
    json!({"ID": id, "NOME": nome, "AREA_HECTARES": 2.5, "STATUS_TERRENO": status})
}

fn form(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => unreachable!(),
    }
}

// ── Fetch ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_updates_items_and_pagination() {
    let (server, farm) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/terrenos"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .and(query_param("sort_by", "ID"))
        .and(query_param("order", "asc"))
        .and(query_param_is_missing("nome"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "terrenos": [terreno(1, "Piquete 1", "DISPONIVEL"), terreno(2, "Piquete 2", "OCUPADO")],
            "page": 1,
            "limit": 10,
            "total": 23
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = farm.terrenos().fetch(FetchOverrides::default()).await.unwrap();
    assert_eq!(page.items.len(), 2);

    let snap = farm.terrenos().snapshot();
    assert!(!snap.loading);
    assert_eq!(snap.items.len(), 2);
    assert_eq!(snap.pagination.rows_number, 23);
    assert_eq!(snap.pagination.total_pages(), 3);
    assert_eq!(snap.disponiveis().len(), 1);
}

#[tokio::test]
async fn test_fetch_sends_active_filters_unwrapped() {
    let (server, farm) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/animais"))
        .and(query_param("sexo", "F"))
        .and(query_param("nome", "Estr"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("chip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "animais": [{"ID": 3, "NOME": "Estrela", "SEXO": "F"}],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    farm.animals()
        .set_filters(
            &FilterSet::new()
                .with("sexo", SelectOption::new(json!("F"), "Fêmea"))
                .with("nome", "Estr"),
        )
        .await;
    farm.animals().fetch(FetchOverrides::default()).await.unwrap();

    assert_eq!(farm.animals().snapshot().femeas().len(), 1);
}

#[tokio::test]
async fn test_soil_analyses_store_filters_by_paddock() {
    let (server, farm) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/manejo/analises-solo"))
        .and(query_param("terreno_id", "2"))
        .and(query_param("sort_by", "DATA_COLETA"))
        .and(query_param("order", "desc"))
        .and(query_param_is_missing("laboratorio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "analises": [{
                "ID": 5, "ID_TERRENO": 2, "DATA_COLETA": "2024-02-10T00:00:00",
                "PH_AGUA": 5.4, "ARQUIVO_LAUDO": "uploads/analise_5.pdf",
                "terreno_nome": "Piquete 2"
            }],
            "total": 1, "page": 1, "limit": 10, "total_pages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    farm.analises()
        .set_filters(&FilterSet::new().with("terreno_id", "2"))
        .await;
    let page = farm.analises().fetch(FetchOverrides::default()).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert!(page.items[0].has_laudo());
    assert_eq!(page.items[0].terreno_nome.as_deref(), Some("Piquete 2"));
}

#[tokio::test]
async fn test_bare_array_health_list() {
    let (server, farm) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/saude/"))
        .and(query_param("limit", "50"))
        .and(query_param("order", "desc"))
        .and(query_param("animal_id", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 10, "ID_ANIMAL": 4, "TIPO_REGISTRO": "VACINA"},
            {"ID": 11, "ID_ANIMAL": 4, "TIPO_REGISTRO": "EXAME", "status_aplicacao": "PENDENTE"}
        ])))
        .mount(&server)
        .await;

    let overrides = FetchOverrides {
        filters: Some(FilterSet::new().with("animal_id", 4_i64)),
        ..FetchOverrides::default()
    };
    farm.saude().fetch(overrides).await.unwrap();

    let snap = farm.saude().snapshot();
    assert_eq!(snap.pagination.rows_number, 2);
    assert_eq!(snap.por_status().len(), 2);
    // Per-call overrides do not stick.
    assert_eq!(snap.filters.get("animal_id"), Some(&FilterValue::Null));
}

#[tokio::test]
async fn test_stale_fetch_does_not_overwrite_newer() {
    let (server, farm) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/terrenos"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"terrenos": [terreno(1, "Antigo", "OCUPADO")], "total": 11}))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/terrenos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "terrenos": [terreno(11, "Novo", "DISPONIVEL")],
            "page": 2,
            "total": 11
        })))
        .mount(&server)
        .await;

    let store = farm.terrenos().clone();
    let slow = tokio::spawn(async move { store.fetch(FetchOverrides::page(1)).await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    farm.terrenos().fetch(FetchOverrides::page(2)).await.unwrap();

    // The slow response still reaches its caller...
    let old_page = slow.await.unwrap().unwrap();
    assert_eq!(old_page.items[0].nome, "Antigo");

    // ...but not the cache.
    let snap = farm.terrenos().snapshot();
    assert_eq!(snap.items.len(), 1);
    assert_eq!(snap.items[0].nome, "Novo");
    assert_eq!(snap.pagination.page, 2);
    assert!(!snap.loading);
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_normalizes_form_and_refetches() {
    let (server, farm) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/animais"))
        .and(body_json(json!({
            "NOME": "Aurora",
            "SEXO": "F",
            "DATA_NASCIMENTO": "2023-09-01T00:00:00",
            "ID_PAI": null,
            "OBSERVACOES": null
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"ID": 40, "NOME": "Aurora", "SEXO": "F"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/animais"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "animais": [{"ID": 40, "NOME": "Aurora", "SEXO": "F"}],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = farm
        .animals()
        .create(form(json!({
            "NOME": "Aurora",
            "SEXO": {"value": "F", "label": "Fêmea"},
            "DATA_NASCIMENTO": "01/09/2023",
            "ID_PAI": {"value": null, "label": "Nenhum"},
            "OBSERVACOES": ""
        })))
        .await
        .unwrap();

    assert_eq!(created.id, 40);
    assert_eq!(farm.animals().snapshot().items.len(), 1);
}

#[tokio::test]
async fn test_delete_clears_current_selection() {
    let (server, farm) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/terrenos/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(terreno(5, "Baixada", "OCUPADO")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/terrenos/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/terrenos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"terrenos": [], "total": 0})))
        .mount(&server)
        .await;

    farm.terrenos().get(5).await.unwrap();
    assert_eq!(farm.terrenos().snapshot().current.as_ref().unwrap().id, 5);

    farm.terrenos().delete(5).await.unwrap();
    assert!(farm.terrenos().snapshot().current.is_none());
}

#[tokio::test]
async fn test_get_missing_record_names_the_entity() {
    let (server, farm) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/medicamentos/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Medicamento não encontrado"})),
        )
        .mount(&server)
        .await;

    let err = farm.medicamentos().get(99).await.unwrap_err();
    match err {
        CoreError::NotFound {
            entity_type,
            identifier,
        } => {
            assert_eq!(entity_type, "medicamentos");
            assert_eq!(identifier, "99");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_error_surfaces_field_label() {
    let (server, farm) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/saude/3"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "ID_ANIMAL"], "msg": "field required", "type": "missing"},
                {"loc": ["body", "TIPO_REGISTRO"], "msg": "field required", "type": "missing"}
            ]
        })))
        .mount(&server)
        .await;

    let err = farm
        .saude()
        .update(3, form(json!({"DESCRICAO": "Reforço"})))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Animal: field required (e mais 1 erro)");
}

#[tokio::test]
async fn test_unreachable_backend_reads_as_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let session = SessionHandle::bootstrap(logged_in_store()).unwrap();
    let api = ApiClient::from_reqwest(
        &format!("http://127.0.0.1:{port}"),
        reqwest::Client::new(),
        session,
    )
    .unwrap();

    let raw = ResourceClient::<Animal>::new(api.clone())
        .get(1)
        .await
        .unwrap_err();
    assert_eq!(
        feedback::extract_message(&raw, "Erro ao carregar animal"),
        "Erro de conexão. Verifique sua internet."
    );

    let farm = Farm::from_client(api);
    let err = farm
        .animals()
        .fetch(FetchOverrides::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ConnectionFailed { .. }), "got: {err:?}");
    assert_eq!(err.user_message(), feedback::NETWORK_ERROR);
    assert!(farm.session().is_authenticated());
    assert!(!farm.animals().snapshot().loading);
}

// ── Session & guard ─────────────────────────────────────────────────

#[tokio::test]
async fn test_login_then_logout_drives_guard() {
    let store = Arc::new(MemorySessionStore::new());
    let (server, farm) = setup_with(Arc::clone(&store)).await;

    assert_eq!(farm.navigate("/dashboard"), Navigation::Redirect("/login"));

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"EMAIL": "joao@haras.com", "SENHA": "segredo"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "a1",
            "refresh_token": "r1",
            "token_type": "bearer",
            "user": {"ID": 7, "NOME_COMPLETO": "João Lima", "EMAIL": "joao@haras.com"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = farm
        .login("joao@haras.com", &SecretString::from("segredo".to_owned()))
        .await
        .unwrap();
    assert!(matches!(outcome, LoginOutcome::Authenticated(_)));
    assert_eq!(farm.navigate("/dashboard"), Navigation::Proceed(Route::Dashboard));
    assert_eq!(store.load().unwrap().access_token.as_deref(), Some("a1"));

    farm.logout().await;
    assert!(farm.current_user().is_err());
    assert!(store.snapshot().is_empty());
    assert_eq!(farm.navigate("/dashboard"), Navigation::Redirect("/login"));
}

#[tokio::test]
async fn test_upcoming_applications_are_bucketed() {
    let (server, farm) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/saude/proximas-aplicacoes/"))
        .and(query_param("dias_antecedencia", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"animal_id": 1, "animal_nome": "Estrela", "tipo_registro": "VACINA", "dias_restantes": -1},
            {"animal_id": 2, "animal_nome": "Trovão", "tipo_registro": "VERMIFUGO", "dias_restantes": 3},
            {"animal_id": 3, "animal_nome": "Aurora", "tipo_registro": "VACINA", "dias_restantes": 20}
        ])))
        .mount(&server)
        .await;

    let buckets = farm.upcoming_applications(30).await.unwrap();
    assert_eq!(buckets.atrasadas[0].animal_nome, "Estrela");
    assert_eq!(buckets.urgentes.len(), 1);
    assert_eq!(buckets.proximas.len(), 1);
}
