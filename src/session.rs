//! The request/render/error cycle behind the recommendation page.
//!
//! A [`Session`] owns everything the page used to keep in globals: the
//! selections, the recipe open in the detail modal, the ids of the results on
//! screen and the pending toasts. Each operation talks to the backend, turns
//! the outcome into a [`View`] and records it, so a front end only has to
//! render whatever [`Session::results`] and [`Session::detail`] hold.

use log::{debug, info};

use crate::client::{ApiClient, RecommendationBackend};
use crate::config::ClientConfig;
use crate::error::{ClientError, FailureKind};
use crate::model::{PdfOptions, QueryAnalysis, RecipeSummary};
use crate::notify::{Notifier, Toast};
use crate::render::{EmptyKind, MessageLevel, Renderer};
use crate::selection::{AddOutcome, Selection};

const INVALID_RESPONSE: &str = "Error: La respuesta del servidor no es válida";
const CONNECTION_TOAST: &str = "Error de conexión";

/// What a display region currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Nothing rendered yet
    Blank,
    Results { html: String, recipe_ids: Vec<u64> },
    Empty { kind: EmptyKind, html: String },
    Message { level: MessageLevel, text: String, html: String },
    Detail { title: String, html: String },
    DetailError { html: String },
}

impl View {
    pub fn html(&self) -> &str {
        match self {
            View::Blank => "",
            View::Results { html, .. }
            | View::Empty { html, .. }
            | View::Message { html, .. }
            | View::Detail { html, .. }
            | View::DetailError { html } => html,
        }
    }
}

/// Page-lifetime state of one user
pub struct Session<B: RecommendationBackend = ApiClient> {
    backend: B,
    renderer: Renderer,
    notifier: Notifier,
    selection: Selection,
    max_results: u32,
    current_recipe: Option<u64>,
    results: View,
    detail: Option<View>,
}

impl Session<ApiClient> {
    /// Session against the service described by `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = ApiClient::builder().config(config).build()?;
        Ok(Session::new(client)
            .with_max_results(config.max_results)
            .with_renderer(Renderer::new(config.static_prefix.clone())))
    }
}

impl<B: RecommendationBackend> Session<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            renderer: Renderer::default(),
            notifier: Notifier::new(),
            selection: Selection::default(),
            max_results: 5,
            current_recipe: None,
            results: View::Blank,
            detail: None,
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The results region
    pub fn results(&self) -> &View {
        &self.results
    }

    /// The detail modal, if one was opened
    pub fn detail(&self) -> Option<&View> {
        self.detail.as_ref()
    }

    pub fn current_recipe(&self) -> Option<u64> {
        self.current_recipe
    }

    /// Ids of the recipes currently shown in the results region
    pub fn shown_recipes(&self) -> &[u64] {
        match &self.results {
            View::Results { recipe_ids, .. } => recipe_ids,
            _ => &[],
        }
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        self.notifier.drain()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    // Selections

    pub fn add_ingredient(&mut self, value: &str) -> AddOutcome {
        let outcome = self.selection.ingredients.add(value);
        match &outcome {
            AddOutcome::Added(v) => self.notifier.success(format!("{} agregado correctamente", v)),
            AddOutcome::Empty => self.notifier.warning("Por favor ingresa un ingrediente"),
            AddOutcome::Duplicate(_) => self.notifier.warning("Este ingrediente ya está agregado"),
        }
        outcome
    }

    pub fn remove_ingredient(&mut self, value: &str) -> bool {
        let removed = self.selection.ingredients.remove(value);
        if removed {
            self.notifier.info(format!("{} eliminado", value.trim()));
        }
        removed
    }

    pub fn add_allergy(&mut self, value: &str) -> AddOutcome {
        let outcome = self.selection.allergies.add(value);
        match &outcome {
            AddOutcome::Added(v) => self.notifier.success(format!("Alergia a {} registrada", v)),
            AddOutcome::Empty => self.notifier.warning("Por favor ingresa una alergia"),
            AddOutcome::Duplicate(_) => self.notifier.warning("Esta alergia ya está agregada"),
        }
        outcome
    }

    pub fn remove_allergy(&mut self, value: &str) -> bool {
        let removed = self.selection.allergies.remove(value);
        if removed {
            self.notifier.info(format!("Alergia a {} eliminada", value.trim()));
        }
        removed
    }

    /// Checks or unchecks a dietary restriction
    pub fn set_restriction(&mut self, value: &str, checked: bool) {
        if checked {
            self.selection.restrictions.add(value);
        } else {
            self.selection.restrictions.remove(value);
        }
    }

    pub fn ingredients_html(&self) -> String {
        self.renderer.ingredient_badges(&self.selection.ingredients)
    }

    pub fn allergies_html(&self) -> String {
        self.renderer.allergy_badges(&self.selection.allergies)
    }

    // Requests

    /// Recommendations for the selected ingredients.
    ///
    /// With no ingredients selected nothing is sent and the results region
    /// keeps its previous content.
    pub async fn search_by_ingredients(&mut self) -> &View {
        if self.selection.ingredients.is_empty() {
            self.notifier.warning("Por favor, agrega al menos un ingrediente");
            return &self.results;
        }

        info!("Searching by ingredients: {:?}", self.selection.ingredients.items());
        let result = self
            .backend
            .recommend_by_ingredients(self.selection.ingredients.items(), self.max_results)
            .await;

        self.results = match result {
            Ok(recs) if !recs.data.is_empty() => {
                self.notifier.success(format!(
                    "¡Encontré {} recetas perfectas para ti!",
                    recs.data.len()
                ));
                self.results_view(&recs.data, recs.method.as_deref(), None)
            }
            Ok(_) | Err(ClientError::Api { .. }) => {
                self.notifier
                    .info("No encontré recetas con esos ingredientes. ¡Intenta con otros!");
                self.empty_view(EmptyKind::Ingredients)
            }
            Err(err) => self.failure_view(
                err,
                "Error de conexión. Por favor, intenta de nuevo.",
                CONNECTION_TOAST,
            ),
        };
        &self.results
    }

    /// Recommendations for a free-text query
    pub async fn search_by_query(&mut self, query: &str) -> &View {
        let query = query.trim();
        if query.is_empty() {
            self.notifier.warning("Por favor, escribe una consulta");
            return &self.results;
        }

        info!("Searching by query: {}", query);
        let result = self
            .backend
            .recommend_by_query(query, self.max_results)
            .await;

        self.results = match result {
            Ok(recs) if !recs.data.recomendaciones.is_empty() => {
                self.notifier.success("¡Consulta procesada exitosamente!");
                let analysis = recs.data.analisis.as_ref();
                self.results_view(&recs.data.recomendaciones, recs.method.as_deref(), analysis)
            }
            Ok(_) | Err(ClientError::Api { .. }) => {
                self.notifier.info(
                    "No encontré recetas para tu consulta. ¡Intenta con otros términos!",
                );
                self.empty_view(EmptyKind::Query)
            }
            Err(err) => self.failure_view(
                err,
                "Error al procesar tu consulta. Intenta de nuevo.",
                "Error al procesar consulta",
            ),
        };
        &self.results
    }

    /// Recipes similar to `id`
    pub async fn similar_recipes(&mut self, id: u64) -> &View {
        let result = self.backend.similar_recipes(id, self.max_results).await;

        self.results = match result {
            Ok(recs) if !recs.data.is_empty() => {
                self.notifier
                    .success(format!("{} recetas similares encontradas", recs.data.len()));
                self.results_view(&recs.data, recs.method.as_deref(), None)
            }
            Ok(_) | Err(ClientError::Api { .. }) => {
                self.notifier.info("No encontré recetas similares");
                self.empty_view(EmptyKind::Similar)
            }
            Err(err) => self.failure_view(
                err,
                "Error de conexión. Por favor, intenta de nuevo.",
                CONNECTION_TOAST,
            ),
        };
        &self.results
    }

    /// Opens the detail modal for `id`
    pub async fn view_recipe(&mut self, id: u64) -> &View {
        self.current_recipe = Some(id);
        let result = self.backend.recipe_detail(id).await;

        let view = match result {
            Ok(recipe) => {
                self.notifier.success("Receta cargada correctamente");
                View::Detail {
                    title: recipe.summary.nombre.clone(),
                    html: self.renderer.recipe_detail(&recipe),
                }
            }
            Err(err) => {
                let text = match err.kind() {
                    FailureKind::Application => "Error al cargar los detalles de la receta.",
                    FailureKind::Malformed => "Error al cargar la receta",
                    FailureKind::Network | FailureKind::Validation => {
                        "Error de conexión. Intenta de nuevo."
                    }
                };
                debug!("Detail for recipe {} failed: {}", id, err);
                self.notifier.error(text);
                View::DetailError {
                    html: self.renderer.detail_error(text),
                }
            }
        };
        self.detail.insert(view)
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.current_recipe = None;
    }

    /// Sends the chosen restrictions and allergies to the server
    pub async fn save_preferences(&mut self) -> &View {
        let result = self
            .backend
            .save_preferences(
                self.selection.restrictions.items(),
                self.selection.allergies.items(),
            )
            .await;

        self.results = match result {
            Ok(message) => {
                self.notifier.success("Preferencias guardadas exitosamente");
                let text = message.unwrap_or_else(|| {
                    "Preferencias guardadas correctamente. Las recomendaciones ahora serán personalizadas según tus necesidades.".to_string()
                });
                self.message_view(text, MessageLevel::Success)
            }
            Err(ClientError::Api { error }) => {
                let text = error
                    .unwrap_or_else(|| "No se pudieron guardar las preferencias.".to_string());
                self.notifier.warning(text.clone());
                self.message_view(text, MessageLevel::Warning)
            }
            Err(err) => self.failure_view(
                err,
                "Error de conexión al guardar preferencias",
                CONNECTION_TOAST,
            ),
        };
        &self.results
    }

    /// Asks the server to retrain its recommendation models
    pub async fn retrain(&mut self) -> &View {
        let result = self.backend.retrain().await;

        self.results = match result {
            Ok(_) => {
                self.notifier.success("IA reentrenada exitosamente");
                self.message_view(
                    "Sistema de IA reentrenado correctamente. Las próximas recomendaciones serán aún más precisas!",
                    MessageLevel::Success,
                )
            }
            Err(ClientError::Api { error }) => {
                self.notifier.error("Error al reentrenar");
                self.message_view(
                    format!(
                        "Error al reentrenar el sistema: {}",
                        error.as_deref().unwrap_or("Error desconocido")
                    ),
                    MessageLevel::Warning,
                )
            }
            Err(err) => self.failure_view(
                err,
                "Error de conexión al reentrenar el sistema",
                CONNECTION_TOAST,
            ),
        };
        &self.results
    }

    /// Rates a recipe from 1 to 5; returns whether the server accepted it
    pub async fn send_feedback(&mut self, id: u64, score: u8, comment: &str) -> bool {
        match self.backend.send_feedback(id, score, comment).await {
            Ok(_) => {
                self.notifier.success("¡Gracias por tu opinión!");
                true
            }
            Err(ClientError::Validation(reason)) => {
                self.notifier.warning(reason);
                false
            }
            Err(err) => {
                self.notifier
                    .error(format!("No se pudo registrar tu opinión: {}", err));
                false
            }
        }
    }

    /// PDF of the recipe open in the detail modal; `None` when no recipe is open
    pub async fn download_recipe_pdf(&mut self, options: PdfOptions) -> Option<Vec<u8>> {
        let id = self.current_recipe?;
        self.notifier.info("Descargando PDF...");
        match self.backend.recipe_pdf(id, options).await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                self.notifier.error(format!("No se pudo descargar el PDF: {}", err));
                None
            }
        }
    }

    /// PDF with every recipe in the results region; `None` when none are shown
    pub async fn download_results_pdf(&mut self, title: Option<&str>) -> Option<Vec<u8>> {
        let ids = self.shown_recipes().to_vec();
        if ids.is_empty() {
            return None;
        }
        self.notifier
            .info(format!("Generando PDF con {} recetas...", ids.len()));
        match self.backend.recommendations_pdf(&ids, title).await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                self.notifier.error(format!("No se pudo generar el PDF: {}", err));
                None
            }
        }
    }

    // View construction

    fn results_view(
        &self,
        recipes: &[RecipeSummary],
        method: Option<&str>,
        analysis: Option<&QueryAnalysis>,
    ) -> View {
        View::Results {
            html: self.renderer.results(recipes, method, analysis),
            recipe_ids: recipes.iter().map(|r| r.id).collect(),
        }
    }

    fn empty_view(&self, kind: EmptyKind) -> View {
        View::Empty {
            kind,
            html: self.renderer.empty_state(kind),
        }
    }

    fn message_view(&self, text: impl Into<String>, level: MessageLevel) -> View {
        let text = text.into();
        View::Message {
            html: self.renderer.message(&text, level),
            text,
            level,
        }
    }

    /// Inline message plus toast for a transport, decoding or validation failure
    fn failure_view(&mut self, err: ClientError, network_text: &str, network_toast: &str) -> View {
        debug!("Request failed: {}", err);
        match err.kind() {
            FailureKind::Malformed => {
                self.notifier.error("Respuesta del servidor no válida");
                self.message_view(INVALID_RESPONSE, MessageLevel::Danger)
            }
            FailureKind::Validation => {
                self.notifier.warning(err.to_string());
                self.results.clone()
            }
            FailureKind::Network | FailureKind::Application => {
                self.notifier.error(network_toast);
                self.message_view(network_text, MessageLevel::Danger)
            }
        }
    }
}
