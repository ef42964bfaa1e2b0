mod common;

use reqwest::StatusCode;
use serde_json::json;

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    common::cleanup(app).await;
}

// ── Bootstrap seeding ───────────────────────────────────────────

#[tokio::test]
async fn inicializar_rejects_wrong_code() {
    let app = common::spawn_app().await;

    let (body, status) = app.get("/api/inicializar?codigo=errado").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(app.count_usuarios().await, 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn inicializar_seeds_default_admin() {
    let app = common::spawn_app().await;

    let (body, status) = app.inicializar().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["usuarioAdmin"]["email"], json!("admin@gadogest.com"));
    assert_eq!(app.count_usuarios().await, 1);

    let (body, status) = app.login("admin@gadogest.com", "admin123").await;
    assert_eq!(status, StatusCode::OK, "seeded admin cannot login: {body}");

    common::cleanup(app).await;
}

#[tokio::test]
async fn inicializar_is_idempotent() {
    let app = common::spawn_app().await;

    app.inicializar().await;
    app.cadastro("Maria", "maria@fazenda.com", "senha123", "Boa Vista")
        .await;
    assert_eq!(app.count_usuarios().await, 2);

    let (body, status) = app.inicializar().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(app.count_usuarios().await, 2);

    common::cleanup(app).await;
}

// ── Registration & Auth ─────────────────────────────────────────

#[tokio::test]
async fn cadastro_rejects_missing_fields() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post(
            "/api/auth/cadastro",
            &json!({ "email": "jose@fazenda.com", "senha": "senha123", "confirmarSenha": "senha123" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Por favor, informe o nome"), "{message}");
    assert!(
        message.contains("Por favor, informe o nome da fazenda"),
        "{message}"
    );
    assert_eq!(app.count_usuarios().await, 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn cadastro_rejects_password_mismatch() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post(
            "/api/auth/cadastro",
            &json!({
                "nome": "José",
                "email": "jose@fazenda.com",
                "senha": "senha123",
                "confirmarSenha": "outra456",
                "nomeFazenda": "Boa Vista",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("As senhas não coincidem"));
    assert_eq!(app.count_usuarios().await, 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn cadastro_rejects_invalid_email() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .cadastro("José", "nao-e-um-email", "senha123", "Boa Vista")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"].as_str().unwrap().contains("email válido"),
        "{body}"
    );

    common::cleanup(app).await;
}

#[tokio::test]
async fn cadastro_rejects_duplicate_email() {
    let app = common::spawn_app().await;

    let (_, status) = app
        .cadastro("José", "jose@fazenda.com", "senha123", "Boa Vista")
        .await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app
        .cadastro("Outro José", "jose@fazenda.com", "senha456", "Santa Fé")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Este email já está em uso"));
    assert_eq!(app.count_usuarios().await, 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn login_valid_credentials() {
    let app = common::spawn_app().await;
    app.cadastro("José", "jose@fazenda.com", "senha123", "Boa Vista")
        .await;

    let (body, status) = app.login("jose@fazenda.com", "senha123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["token"].is_string());
    assert_eq!(body["usuario"]["nome"], json!("José"));
    assert_eq!(body["usuario"]["cargo"], json!("Administrador"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn login_does_not_distinguish_unknown_email_from_wrong_password() {
    let app = common::spawn_app().await;
    app.cadastro("José", "jose@fazenda.com", "senha123", "Boa Vista")
        .await;

    let (wrong_pw, status_pw) = app.login("jose@fazenda.com", "senhaerrada").await;
    let (unknown, status_unknown) = app.login("ninguem@fazenda.com", "senha123").await;

    assert_eq!(status_pw, StatusCode::UNAUTHORIZED);
    assert_eq!(status_unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw["message"], json!("Credenciais inválidas"));
    assert_eq!(wrong_pw["message"], unknown["message"]);

    common::cleanup(app).await;
}

#[tokio::test]
async fn login_requires_email_and_password() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post("/api/auth/login", &json!({ "email": "jose@fazenda.com" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Por favor, informe email e senha"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn perfil_requires_token() {
    let app = common::spawn_app().await;

    let (body, status) = app.get("/api/auth/perfil").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    let (_, status) = app.get_auth("/api/auth/perfil", "token-invalido").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

#[tokio::test]
async fn perfil_returns_caller_without_password() {
    let app = common::spawn_app().await;
    let token = app.login_admin().await;

    let (body, status) = app.get_auth("/api/auth/perfil", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usuario"]["email"], json!("admin@gadogest.com"));
    assert!(body["usuario"].get("senhaHash").is_none());
    assert!(body["usuario"].get("senha_hash").is_none());

    common::cleanup(app).await;
}

// ── Animais ─────────────────────────────────────────────────────

#[tokio::test]
async fn criar_animal_applies_defaults() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post(
            "/api/animais",
            &json!({
                "identificacao": "BOV-001",
                "tipo": "Boi",
                "raca": "Nelore",
                "dataNascimento": "2021-03-15",
                "peso": 450.0,
                "fazenda": "Boa Vista",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], json!("Animal cadastrado com sucesso"));
    assert_eq!(body["animal"]["sexo"], json!("Macho"));
    assert_eq!(body["animal"]["status"], json!("Saudável"));
    assert_eq!(body["animal"]["ativo"], json!(true));

    common::cleanup(app).await;
}

#[tokio::test]
async fn criar_animal_rejects_missing_fields() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post("/api/animais", &json!({ "tipo": "Boi", "raca": "Nelore" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("identificação"), "{message}");
    assert!(message.contains("data de nascimento"), "{message}");
    assert!(message.contains("peso"), "{message}");

    let (body, _) = app.get("/api/animais").await;
    assert_eq!(body["total"], json!(0));

    common::cleanup(app).await;
}

#[tokio::test]
async fn cadastrar_requires_full_field_set() {
    let app = common::spawn_app().await;

    // The lenient path would default sexo; the registration path demands it.
    let (body, status) = app
        .post(
            "/api/animais/cadastrar",
            &json!({
                "identificacao": "BOV-002",
                "tipo": "Boi",
                "raca": "Nelore",
                "dataNascimento": "2021-03-15",
                "peso": 450.0,
                "fazenda": "Boa Vista",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("sexo"), "{body}");

    common::cleanup(app).await;
}

#[tokio::test]
async fn criar_animal_rejects_duplicate_identificacao() {
    let app = common::spawn_app().await;

    let animal = app.criar_animal("BOV-001", "Boi", "Saudável").await;

    let (body, status) = app
        .post(
            "/api/animais",
            &json!({
                "identificacao": "BOV-001",
                "tipo": "Vaca",
                "raca": "Gir",
                "dataNascimento": "2020-01-01",
                "peso": 380.0,
                "fazenda": "Boa Vista",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Já existe um animal com essa identificação")
    );

    // The existing record is untouched.
    let id = animal["id"].as_str().unwrap();
    let (body, _) = app.get(&format!("/api/animais/{id}")).await;
    assert_eq!(body["animal"]["raca"], json!("Nelore"));
    assert_eq!(body["animal"]["tipo"], json!("Boi"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn criar_animal_rejects_invalid_enum() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post(
            "/api/animais",
            &json!({
                "identificacao": "BOV-003",
                "tipo": "Cabra",
                "raca": "Nelore",
                "dataNascimento": "2021-03-15",
                "peso": 450.0,
                "fazenda": "Boa Vista",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Valor inválido para o campo tipo"),
        "{body}"
    );

    common::cleanup(app).await;
}

#[tokio::test]
async fn listar_animais_filters_and_orders() {
    let app = common::spawn_app().await;

    app.criar_animal("BOV-001", "Boi", "Saudável").await;
    app.criar_animal("BOV-002", "Boi", "Vendido").await;
    app.criar_animal("VAC-001", "Vaca", "Saudável").await;
    app.criar_animal("BOV-003", "Boi", "Saudável").await;

    let (body, status) = app.get("/api/animais?tipo=Boi&status=Saudável").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(2));
    let animais = body["animais"].as_array().unwrap();
    // Newest registration first.
    assert_eq!(animais[0]["identificacao"], json!("BOV-003"));
    assert_eq!(animais[1]["identificacao"], json!("BOV-001"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn listar_animais_busca_por_termo() {
    let app = common::spawn_app().await;

    app.criar_animal("BOV-001", "Boi", "Saudável").await;
    app.criar_animal("VAC-001", "Vaca", "Saudável").await;

    let (body, _) = app.get("/api/animais?termo=vac").await;
    assert_eq!(body["total"], json!(1));

    // The term also matches the breed, case-insensitively.
    let (body, _) = app.get("/api/animais?termo=nelore").await;
    assert_eq!(body["total"], json!(2));

    common::cleanup(app).await;
}

#[tokio::test]
async fn obter_animal_inexistente_returns_404() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .get("/api/animais/00000000-0000-0000-0000-000000000000")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Animal não encontrado"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn excluir_animal_inexistente_returns_404() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .delete("/api/animais/00000000-0000-0000-0000-000000000000")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));

    common::cleanup(app).await;
}

#[tokio::test]
async fn atualizar_animal_refreshes_ultima_atualizacao() {
    let app = common::spawn_app().await;

    let animal = app.criar_animal("BOV-001", "Boi", "Saudável").await;
    let id = animal["id"].as_str().unwrap();
    let antes = animal["ultimaAtualizacao"].as_str().unwrap().to_string();

    let (body, status) = app
        .put(
            &format!("/api/animais/{id}"),
            &json!({ "peso": 475.0, "status": "Em tratamento" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Animal atualizado com sucesso"));
    assert_eq!(body["animal"]["peso"], json!(475.0));
    assert_eq!(body["animal"]["status"], json!("Em tratamento"));
    assert_ne!(body["animal"]["ultimaAtualizacao"].as_str().unwrap(), antes);
    // Untouched fields keep their values.
    assert_eq!(body["animal"]["raca"], json!("Nelore"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn atualizar_animal_rejects_invalid_status() {
    let app = common::spawn_app().await;

    let animal = app.criar_animal("BOV-001", "Boi", "Saudável").await;
    let id = animal["id"].as_str().unwrap();

    let (body, status) = app
        .put(&format!("/api/animais/{id}"), &json!({ "status": "Voando" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Valor inválido para o campo status"),
        "{body}"
    );

    common::cleanup(app).await;
}

#[tokio::test]
async fn excluir_animal() {
    let app = common::spawn_app().await;

    let animal = app.criar_animal("BOV-001", "Boi", "Saudável").await;
    let id = animal["id"].as_str().unwrap();

    let (body, status) = app.delete(&format!("/api/animais/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Animal excluído com sucesso"));

    let (_, status) = app.get(&format!("/api/animais/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

// ── Saúde ───────────────────────────────────────────────────────

#[tokio::test]
async fn saude_create_and_list_with_animal_reference() {
    let app = common::spawn_app().await;

    let animal = app.criar_animal("BOV-001", "Boi", "Saudável").await;
    let animal_id = animal["id"].as_str().unwrap();

    let (body, status) = app
        .post(
            "/api/saude",
            &json!({
                "animal": animal_id,
                "tipo": "Vacinação",
                "data": "2024-05-10",
                "produto": "Febre Aftosa",
                "aplicador": "João Silva",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(
        body["message"],
        json!("Registro de saúde cadastrado com sucesso")
    );
    assert_eq!(body["registro"]["status"], json!("Realizado"));
    assert_eq!(body["registro"]["animal"]["identificacao"], json!("BOV-001"));

    let (body, _) = app.get("/api/saude").await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["dados"][0]["animal"]["raca"], json!("Nelore"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn saude_rejects_missing_animal() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post(
            "/api/saude",
            &json!({
                "animal": "00000000-0000-0000-0000-000000000000",
                "tipo": "Exame",
                "data": "2024-05-10",
                "aplicador": "João Silva",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Animal não encontrado"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn saude_propagates_animal_status() {
    let app = common::spawn_app().await;

    let animal = app.criar_animal("BOV-001", "Boi", "Saudável").await;
    let animal_id = animal["id"].as_str().unwrap();

    let (_, status) = app
        .post(
            "/api/saude",
            &json!({
                "animal": animal_id,
                "tipo": "Medicação",
                "data": "2024-05-10",
                "aplicador": "João Silva",
                "atualizarStatusAnimal": true,
                "novoStatusAnimal": "Em tratamento",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (body, _) = app.get(&format!("/api/animais/{animal_id}")).await;
    assert_eq!(body["animal"]["status"], json!("Em tratamento"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn saude_pagination_metadata() {
    let app = common::spawn_app().await;

    let animal = app.criar_animal("BOV-001", "Boi", "Saudável").await;
    let animal_id = animal["id"].as_str().unwrap();

    for dia in ["2024-05-01", "2024-05-02", "2024-05-03"] {
        let (_, status) = app
            .post(
                "/api/saude",
                &json!({
                    "animal": animal_id,
                    "tipo": "Exame",
                    "data": dia,
                    "aplicador": "João Silva",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (body, _) = app.get("/api/saude?limite=2&pagina=1").await;
    assert_eq!(body["total"], json!(3));
    assert_eq!(body["totalPaginas"], json!(2));
    assert_eq!(body["dados"].as_array().unwrap().len(), 2);
    // Most recent procedure first.
    assert_eq!(
        body["dados"][0]["data"].as_str().unwrap()[..10],
        *"2024-05-03"
    );

    let (body, _) = app.get("/api/saude?limite=2&pagina=2").await;
    assert_eq!(body["dados"].as_array().unwrap().len(), 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn saude_update_and_delete() {
    let app = common::spawn_app().await;

    let animal = app.criar_animal("BOV-001", "Boi", "Saudável").await;
    let animal_id = animal["id"].as_str().unwrap();

    let (body, _) = app
        .post(
            "/api/saude",
            &json!({
                "animal": animal_id,
                "tipo": "Vacinação",
                "data": "2024-05-10",
                "aplicador": "João Silva",
                "status": "Agendado",
            }),
        )
        .await;
    let id = body["registro"]["id"].as_str().unwrap().to_string();

    let (body, status) = app
        .put(
            &format!("/api/saude/{id}"),
            &json!({ "status": "Realizado", "custo": 45.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registro"]["status"], json!("Realizado"));
    assert_eq!(body["registro"]["custo"], json!(45.0));

    let (_, status) = app.delete(&format!("/api/saude/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app.get(&format!("/api/saude/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

// ── Financeiro ──────────────────────────────────────────────────

async fn criar_financeiro(app: &common::TestApp, tipo: &str, valor: f64, categoria: &str) {
    let (body, status) = app
        .post(
            "/api/financeiro",
            &json!({
                "tipo": tipo,
                "categoria": categoria,
                "descricao": format!("{categoria} de teste"),
                "valor": valor,
                "data": "2024-06-01",
                "formaPagamento": "Dinheiro",
                "status": "Pago",
                "fazenda": "Boa Vista",
                "responsavel": "Maria Oliveira",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "criar financeiro failed: {body}");
}

#[tokio::test]
async fn financeiro_resumo_saldo_matches_filtered_set() {
    let app = common::spawn_app().await;

    criar_financeiro(&app, "Receita", 1000.0, "Venda de Gado").await;
    criar_financeiro(&app, "Receita", 500.0, "Venda de Leite").await;
    criar_financeiro(&app, "Despesa", 300.0, "Ração").await;

    let (body, status) = app.get("/api/financeiro").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resumo"]["receitas"], json!(1500.0));
    assert_eq!(body["resumo"]["despesas"], json!(300.0));
    assert_eq!(body["resumo"]["saldo"], json!(1200.0));

    // The summary follows the filter: only revenue records remain in the set.
    let (body, _) = app.get("/api/financeiro?tipo=Receita").await;
    assert_eq!(body["total"], json!(2));
    assert_eq!(body["resumo"]["receitas"], json!(1500.0));
    assert_eq!(body["resumo"]["despesas"], json!(0.0));
    assert_eq!(body["resumo"]["saldo"], json!(1500.0));

    // And a category filter narrows it further.
    let (body, _) = app.get("/api/financeiro?categoria=Ração").await;
    assert_eq!(body["resumo"]["receitas"], json!(0.0));
    assert_eq!(body["resumo"]["despesas"], json!(300.0));
    assert_eq!(body["resumo"]["saldo"], json!(-300.0));

    common::cleanup(app).await;
}

#[tokio::test]
async fn financeiro_rejects_missing_fields() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post(
            "/api/financeiro",
            &json!({ "tipo": "Receita", "valor": 100.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("categoria"), "{message}");
    assert!(message.contains("descrição"), "{message}");
    assert!(message.contains("responsável"), "{message}");

    let (body, _) = app.get("/api/financeiro").await;
    assert_eq!(body["total"], json!(0));

    common::cleanup(app).await;
}

#[tokio::test]
async fn financeiro_rejects_invalid_forma_pagamento() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post(
            "/api/financeiro",
            &json!({
                "tipo": "Despesa",
                "categoria": "Ração",
                "descricao": "Compra de ração",
                "valor": 250.0,
                "data": "2024-06-01",
                "formaPagamento": "Escambo",
                "status": "Pago",
                "fazenda": "Boa Vista",
                "responsavel": "Maria Oliveira",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Valor inválido para o campo formaPagamento"),
        "{body}"
    );

    common::cleanup(app).await;
}

#[tokio::test]
async fn financeiro_get_update_delete() {
    let app = common::spawn_app().await;

    criar_financeiro(&app, "Despesa", 250.0, "Ração").await;
    let (body, _) = app.get("/api/financeiro").await;
    let id = body["dados"][0]["id"].as_str().unwrap().to_string();

    let (body, status) = app.get(&format!("/api/financeiro/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registro"]["categoria"], json!("Ração"));

    let (body, status) = app
        .put(
            &format!("/api/financeiro/{id}"),
            &json!({ "status": "Cancelado", "valor": 200.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registro"]["status"], json!("Cancelado"));
    assert_eq!(body["registro"]["valor"], json!(200.0));

    let (_, status) = app.delete(&format!("/api/financeiro/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app.get(&format!("/api/financeiro/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

// ── Reprodução ──────────────────────────────────────────────────

#[tokio::test]
async fn reproducao_create_list_and_resumo() {
    let app = common::spawn_app().await;

    let vaca = app.criar_animal("VAC-001", "Vaca", "Saudável").await;
    let touro = app.criar_animal("TOU-001", "Touro", "Saudável").await;
    let vaca_id = vaca["id"].as_str().unwrap();
    let touro_id = touro["id"].as_str().unwrap();

    let (body, status) = app
        .post(
            "/api/reproducao",
            &json!({
                "tipo": "Cobertura",
                "dataEvento": "2024-04-10",
                "femea": vaca_id,
                "macho": touro_id,
                "metodo": "Natural",
                "responsavel": "João Silva",
                "status": "Confirmada",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["registro"]["femea"]["identificacao"], json!("VAC-001"));
    assert_eq!(body["registro"]["macho"]["identificacao"], json!("TOU-001"));

    let (_, status) = app
        .post(
            "/api/reproducao",
            &json!({
                "tipo": "Nascimento",
                "dataEvento": "2024-05-20",
                "femea": vaca_id,
                "responsavel": "Maria Oliveira",
                "status": "Concluído",
                "bezerros": { "quantidade": 2, "identificacoes": ["BEZ-001", "BEZ-002"] },
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (body, _) = app.get("/api/reproducao").await;
    assert_eq!(body["total"], json!(2));
    assert_eq!(body["resumo"]["coberturas"], json!(1));
    assert_eq!(body["resumo"]["gestacoes"], json!(0));
    assert_eq!(body["resumo"]["nascimentos"], json!(1));
    assert_eq!(body["resumo"]["bezerrosNascidos"], json!(2));

    // Filtering narrows the summary to the filtered set.
    let (body, _) = app.get("/api/reproducao?tipo=Cobertura").await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["resumo"]["nascimentos"], json!(0));
    assert_eq!(body["resumo"]["bezerrosNascidos"], json!(0));

    common::cleanup(app).await;
}

#[tokio::test]
async fn reproducao_rejects_missing_fields() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post("/api/reproducao", &json!({ "tipo": "Cobertura" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("fêmea"), "{message}");
    assert!(message.contains("data do evento"), "{message}");

    common::cleanup(app).await;
}

#[tokio::test]
async fn reproducao_update_and_delete() {
    let app = common::spawn_app().await;

    let vaca = app.criar_animal("VAC-001", "Vaca", "Saudável").await;
    let vaca_id = vaca["id"].as_str().unwrap();

    let (body, _) = app
        .post(
            "/api/reproducao",
            &json!({
                "tipo": "Gestação",
                "dataEvento": "2024-04-10",
                "femea": vaca_id,
                "responsavel": "João Silva",
                "status": "Em Andamento",
            }),
        )
        .await;
    let id = body["registro"]["id"].as_str().unwrap().to_string();

    let (body, status) = app
        .put(
            &format!("/api/reproducao/{id}"),
            &json!({ "status": "Concluído", "dataPrevista": "2025-01-15" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registro"]["status"], json!("Concluído"));

    let (_, status) = app.delete(&format!("/api/reproducao/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app.delete(&format!("/api/reproducao/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));

    common::cleanup(app).await;
}

// ── Usuários ────────────────────────────────────────────────────

#[tokio::test]
async fn usuarios_crud() {
    let app = common::spawn_app().await;
    app.inicializar().await;

    let (body, status) = app
        .post(
            "/api/usuarios",
            &json!({
                "nome": "Gerente Financeiro",
                "email": "gerente@fazenda.com",
                "senha": "senha123",
                "fazenda": "Boa Vista",
                "cargo": "Gerente",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let id = body["usuario"]["id"].as_str().unwrap().to_string();
    assert!(body["usuario"].get("senhaHash").is_none());

    let (body, _) = app.get("/api/usuarios").await;
    assert_eq!(body["total"], json!(2));

    let (body, status) = app
        .put(
            &format!("/api/usuarios/{id}"),
            &json!({ "cargo": "Funcionário", "ativo": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usuario"]["cargo"], json!("Funcionário"));
    assert_eq!(body["usuario"]["ativo"], json!(false));

    let (_, status) = app.delete(&format!("/api/usuarios/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app.delete(&format!("/api/usuarios/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn usuarios_rejects_invalid_cargo() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post(
            "/api/usuarios",
            &json!({
                "nome": "Estagiário",
                "email": "estagiario@fazenda.com",
                "senha": "senha123",
                "fazenda": "Boa Vista",
                "cargo": "Estagiário",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Valor inválido para o campo cargo"),
        "{body}"
    );

    common::cleanup(app).await;
}

// ── Dashboard ───────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_resumo_counts() {
    let app = common::spawn_app().await;

    let animal = app.criar_animal("BOV-001", "Boi", "Saudável").await;
    app.criar_animal("BOV-002", "Boi", "Em tratamento").await;
    let animal_id = animal["id"].as_str().unwrap();

    let (_, status) = app
        .post(
            "/api/saude",
            &json!({
                "animal": animal_id,
                "tipo": "Vacinação",
                "data": "2024-07-01",
                "aplicador": "João Silva",
                "status": "Agendado",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    criar_financeiro(&app, "Receita", 800.0, "Venda de Leite").await;

    let (body, status) = app.get("/api/dashboard/resumo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resumo"]["rebanho"]["total"], json!(2));
    assert_eq!(body["resumo"]["rebanho"]["emTratamento"], json!(1));
    assert_eq!(body["resumo"]["saude"]["agendados"], json!(1));
    assert_eq!(body["resumo"]["financeiro"]["saldo"], json!(800.0));

    common::cleanup(app).await;
}
