use chef_client::{ApiClient, EmptyKind, MessageLevel, PdfOptions, Session, Severity, View};
use mockito::Matcher;
use serde_json::json;

fn session(server: &mockito::Server) -> Session {
    let client = ApiClient::builder().base_url(server.url()).build().unwrap();
    Session::new(client)
}

#[tokio::test]
async fn test_ingredient_search_renders_results() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/recomendaciones/por-ingredientes")
        .match_body(Matcher::Json(json!({
            "ingredientes": ["pollo", "arroz"],
            "max_resultados": 5
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "success": true,
                "data": [
                    {"id": 3, "nombre": "Arroz con pollo", "score_recomendacion": 0.8, "metodos_usados": ["kmeans"]},
                    {"id": 4, "nombre": "Majadito", "ingredientes_faltantes": ["charque"]}
                ],
                "metodo_usado": "sistema_hibrido"
            }"#,
        )
        .create_async()
        .await;

    let mut session = session(&server);
    session.add_ingredient("Pollo");
    session.add_ingredient("  arroz ");
    session.add_ingredient("POLLO");

    let view = session.search_by_ingredients().await.clone();

    match view {
        View::Results { html, recipe_ids } => {
            assert_eq!(recipe_ids, vec![3, 4]);
            assert!(html.contains("Arroz con pollo"));
            assert!(html.contains("Majadito"));
        }
        other => panic!("Expected results, got {:?}", other),
    }
    assert_eq!(session.shown_recipes(), &[3, 4]);
    let toasts = session.take_toasts();
    assert!(toasts.iter().any(|t| t.severity == Severity::Warning));
    assert_eq!(toasts.last().unwrap().severity, Severity::Success);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_selection_blocks_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/recomendaciones/por-ingredientes")
        .expect(0)
        .create_async()
        .await;

    let mut session = session(&server);
    let view = session.search_by_ingredients().await.clone();

    assert_eq!(view, View::Blank);
    let toast = session.take_toasts().pop().unwrap();
    assert_eq!(toast.severity, Severity::Warning);
    assert_eq!(toast.message, "Por favor, agrega al menos un ingrediente");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_matches_show_empty_state_per_search() {
    let mut server = mockito::Server::new_async().await;
    let _ingredients = server
        .mock("POST", "/api/recomendaciones/por-ingredientes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": []}"#)
        .create_async()
        .await;
    let _query = server
        .mock("POST", "/api/recomendaciones/consulta")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "error": "No se pudo procesar la consulta"}"#)
        .create_async()
        .await;

    let mut session = session(&server);
    session.add_ingredient("kiwi");

    let view = session.search_by_ingredients().await.clone();
    assert!(matches!(view, View::Empty { kind: EmptyKind::Ingredients, .. }));
    assert!(view.html().contains("pollo, tomate, cebolla"));

    let view = session.search_by_query("algo imposible").await.clone();
    assert!(matches!(view, View::Empty { kind: EmptyKind::Query, .. }));
    assert!(view.html().contains("No hay resultados"));
    assert!(session.shown_recipes().is_empty());
}

#[tokio::test]
async fn test_malformed_response_shows_invalid_message() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/api/recomendaciones/consulta")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<h1>Bad Gateway</h1>")
        .create_async()
        .await;

    let mut session = session(&server);
    let view = session.search_by_query("sopa").await.clone();

    match view {
        View::Message { level, text, .. } => {
            assert_eq!(level, MessageLevel::Danger);
            assert!(text.contains("no es válida"));
        }
        other => panic!("Expected message, got {:?}", other),
    }
}

#[tokio::test]
async fn test_network_failure_shows_connection_error() {
    let client = ApiClient::builder()
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();
    let mut session = Session::new(client);
    session.add_ingredient("papa");

    let view = session.search_by_ingredients().await.clone();

    match view {
        View::Message { level, text, .. } => {
            assert_eq!(level, MessageLevel::Danger);
            assert!(text.starts_with("Error de conexión"));
        }
        other => panic!("Expected message, got {:?}", other),
    }
    let toast = session.take_toasts().pop().unwrap();
    assert_eq!(toast.severity, Severity::Error);
}

#[tokio::test]
async fn test_detail_error_state() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/api/recetas/12")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "error": "Receta no encontrada"}"#)
        .create_async()
        .await;

    let mut session = session(&server);
    let view = session.view_recipe(12).await.clone();

    match view {
        View::DetailError { html } => {
            assert!(html.contains("Error al cargar los detalles de la receta."))
        }
        other => panic!("Expected detail error, got {:?}", other),
    }
    assert_eq!(session.current_recipe(), Some(12));

    session.close_detail();
    assert!(session.detail().is_none());
    assert!(session.current_recipe().is_none());
}

#[tokio::test]
async fn test_detail_with_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/api/recetas/8")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><body>Mantenimiento</body></html>")
        .create_async()
        .await;

    let mut session = session(&server);
    let view = session.view_recipe(8).await.clone();

    match view {
        View::DetailError { html } => {
            assert!(html.contains("Error al cargar la receta"));
            assert!(!html.contains("detalles"));
        }
        other => panic!("Expected detail error, got {:?}", other),
    }
    let toast = session.take_toasts().pop().unwrap();
    assert_eq!(toast.severity, Severity::Error);
}

#[tokio::test]
async fn test_detail_network_failure() {
    let client = ApiClient::builder()
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();
    let mut session = Session::new(client);

    let view = session.view_recipe(3).await.clone();

    match view {
        View::DetailError { html } => {
            assert!(html.contains("Error de conexión. Intenta de nuevo."))
        }
        other => panic!("Expected detail error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_similar_without_matches_shows_similar_empty_state() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/api/recomendaciones/similares/2")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": []}"#)
        .create_async()
        .await;

    let mut session = session(&server);
    let view = session.similar_recipes(2).await.clone();

    assert!(matches!(view, View::Empty { kind: EmptyKind::Similar, .. }));
    assert!(view.html().contains("Sin recetas similares"));
    let toast = session.take_toasts().pop().unwrap();
    assert_eq!(toast.severity, Severity::Info);
}

#[tokio::test]
async fn test_feedback_out_of_range_is_rejected_locally() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/recomendaciones/feedback")
        .expect(0)
        .create_async()
        .await;

    let mut session = session(&server);
    let accepted = session.send_feedback(4, 9, "").await;

    assert!(!accepted);
    let toast = session.take_toasts().pop().unwrap();
    assert_eq!(toast.severity, Severity::Warning);
    assert!(toast.message.contains("between 1 and 5"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_analysis_shown_even_when_empty() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/api/recomendaciones/consulta")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "success": true,
                "data": {
                    "analisis": {"ingredientes": [], "restricciones": [], "alergias": []},
                    "recomendaciones": [{"id": 11, "nombre": "Charquekan"}]
                }
            }"#,
        )
        .create_async()
        .await;

    let mut session = session(&server);
    let view = session.search_by_query("algo rico").await.clone();

    match view {
        View::Results { html, recipe_ids } => {
            assert_eq!(recipe_ids, vec![11]);
            assert!(html.contains("Análisis de IA completado"));
        }
        other => panic!("Expected results, got {:?}", other),
    }
}

#[tokio::test]
async fn test_detail_then_recipe_pdf() {
    let mut server = mockito::Server::new_async().await;
    let _detail = server
        .mock("GET", "/api/recetas/5")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success": true, "data": {"id": 5, "nombre": "Pique macho", "pasos": [{"numero": 1, "descripcion": "Freír la carne"}]}}"#,
        )
        .create_async()
        .await;
    let pdf = server
        .mock("GET", "/api/recetas/5/pdf")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("include_nutrition".into(), "true".into()),
            Matcher::UrlEncoded("include_substitutes".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body(b"%PDF-1.4".to_vec())
        .create_async()
        .await;

    let mut session = session(&server);
    assert!(session.download_recipe_pdf(PdfOptions::default()).await.is_none());

    let view = session.view_recipe(5).await.clone();
    match view {
        View::Detail { title, html } => {
            assert_eq!(title, "Pique macho");
            assert!(html.contains("Freír la carne"));
        }
        other => panic!("Expected detail, got {:?}", other),
    }

    let bytes = session.download_recipe_pdf(PdfOptions::default()).await.unwrap();
    assert_eq!(bytes, b"%PDF-1.4".to_vec());
    pdf.assert_async().await;
}

#[tokio::test]
async fn test_results_pdf_uses_shown_recipes() {
    let mut server = mockito::Server::new_async().await;
    let _similar = server
        .mock("GET", "/api/recomendaciones/similares/1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": [{"id": 6, "nombre": "Sajta"}, {"id": 2, "nombre": "Ají de fideo"}]}"#)
        .create_async()
        .await;
    let pdf = server
        .mock("POST", "/api/recomendaciones/pdf")
        .match_body(Matcher::PartialJson(json!({"recetas_ids": [6, 2]})))
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body(b"%PDF".to_vec())
        .create_async()
        .await;

    let mut session = session(&server);
    assert!(session.download_results_pdf(None).await.is_none());

    session.similar_recipes(1).await;
    let bytes = session.download_results_pdf(None).await;

    assert!(bytes.is_some());
    pdf.assert_async().await;
}

#[tokio::test]
async fn test_save_preferences_failure_shows_warning() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/recomendaciones/preferencias")
        .match_body(Matcher::Json(json!({
            "restricciones": ["vegano"],
            "alergias": ["nueces"]
        })))
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false}"#)
        .create_async()
        .await;

    let mut session = session(&server);
    session.set_restriction("vegano", true);
    session.add_allergy("Nueces");

    let view = session.save_preferences().await.clone();

    match view {
        View::Message { level, text, .. } => {
            assert_eq!(level, MessageLevel::Warning);
            assert_eq!(text, "No se pudieron guardar las preferencias.");
        }
        other => panic!("Expected message, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_retrain_success_and_failure() {
    let mut server = mockito::Server::new_async().await;
    let ok = server
        .mock("POST", "/api/recomendaciones/entrenar")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "message": "Modelos entrenados correctamente"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut session = session(&server);
    let view = session.retrain().await.clone();
    assert!(matches!(view, View::Message { level: MessageLevel::Success, .. }));
    ok.assert_async().await;
    ok.remove_async().await;

    let _fail = server
        .mock("POST", "/api/recomendaciones/entrenar")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false}"#)
        .create_async()
        .await;

    let view = session.retrain().await.clone();
    match view {
        View::Message { level, text, .. } => {
            assert_eq!(level, MessageLevel::Warning);
            assert_eq!(text, "Error al reentrenar el sistema: Error desconocido");
        }
        other => panic!("Expected message, got {:?}", other),
    }
}
