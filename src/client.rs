use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::{DeserializeOwned, Error as _};
use serde::Serialize;

use crate::builder::ApiClientBuilder;
use crate::error::ClientError;
use crate::model::{
    ApiResponse, FeedbackRequest, Ingredient, IngredientFilter, IngredientSearchRequest,
    PdfOptions, PdfRequest, PreferencesRequest, QueryRequest, QueryResults, RecipeDetail,
    RecipeFilter, RecipeSummary, Recommendations, SystemStatus,
};

/// Operations the session drives against the recommendation service
#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    async fn recommend_by_ingredients(
        &self,
        ingredients: &[String],
        max_results: u32,
    ) -> Result<Recommendations<Vec<RecipeSummary>>, ClientError>;

    async fn recommend_by_query(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Recommendations<QueryResults>, ClientError>;

    async fn recipe_detail(&self, id: u64) -> Result<RecipeDetail, ClientError>;

    /// Returns the server's confirmation message, if any
    async fn save_preferences(
        &self,
        restrictions: &[String],
        allergies: &[String],
    ) -> Result<Option<String>, ClientError>;

    async fn retrain(&self) -> Result<Option<String>, ClientError>;

    async fn similar_recipes(
        &self,
        id: u64,
        max_results: u32,
    ) -> Result<Recommendations<Vec<RecipeSummary>>, ClientError>;

    async fn send_feedback(
        &self,
        id: u64,
        score: u8,
        comment: &str,
    ) -> Result<Option<String>, ClientError>;

    async fn recipe_pdf(&self, id: u64, options: PdfOptions) -> Result<Vec<u8>, ClientError>;

    async fn recommendations_pdf(
        &self,
        ids: &[u64],
        title: Option<&str>,
    ) -> Result<Vec<u8>, ClientError>;
}

/// HTTP client for the recommendation REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a builder with default settings
    ///
    /// # Example
    /// ```
    /// use chef_client::ApiClient;
    ///
    /// let client = ApiClient::builder()
    ///     .base_url("http://localhost:5000")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:5000");
    /// ```
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub(crate) fn from_parts(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError> {
        let payload = serde_json::to_string(body).unwrap_or_default();
        debug!("POST {}: {}", path, payload);
        let response = self.client.post(self.url(path)).json(body).send().await?;
        read_envelope(path, response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ClientError> {
        debug!("GET {}", path);
        let response = self.client.get(self.url(path)).send().await?;
        read_envelope(path, response).await
    }

    async fn get_json_query<Q: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<ApiResponse<T>, ClientError> {
        debug!("GET {}", path);
        let response = self.client.get(self.url(path)).query(query).send().await?;
        read_envelope(path, response).await
    }

    /// All recipes matching the filter
    pub async fn list_recipes(
        &self,
        filter: &RecipeFilter,
    ) -> Result<Vec<RecipeSummary>, ClientError> {
        let path = "/api/recetas/";
        into_data(path, self.get_json_query(path, filter).await?)
    }

    /// The most recently added recipes
    pub async fn recent_recipes(&self, limit: u32) -> Result<Vec<RecipeSummary>, ClientError> {
        let path = "/api/recetas/recientes";
        into_data(path, self.get_json_query(path, &[("limite", limit)]).await?)
    }

    pub async fn categories(&self) -> Result<Vec<String>, ClientError> {
        let path = "/api/recetas/categorias";
        into_data(path, self.get_json(path).await?)
    }

    pub async fn difficulties(&self) -> Result<Vec<String>, ClientError> {
        let path = "/api/recetas/dificultad";
        into_data(path, self.get_json(path).await?)
    }

    /// Catalog ingredients, optionally narrowed by category or name
    pub async fn ingredients(
        &self,
        filter: &IngredientFilter,
    ) -> Result<Vec<Ingredient>, ClientError> {
        let path = "/api/ingredientes/";
        into_data(path, self.get_json_query(path, filter).await?)
    }

    pub async fn ingredient(&self, id: u64) -> Result<Ingredient, ClientError> {
        let path = format!("/api/ingredientes/{}", id);
        into_data(&path, self.get_json(&path).await?)
    }

    /// Ingredients flagged as allergens, for the allergy picker
    pub async fn allergens(&self) -> Result<Vec<Ingredient>, ClientError> {
        let path = "/api/ingredientes/alergenos";
        into_data(path, self.get_json(path).await?)
    }

    pub async fn gluten_free(&self) -> Result<Vec<Ingredient>, ClientError> {
        let path = "/api/ingredientes/sin-gluten";
        into_data(path, self.get_json(path).await?)
    }

    pub async fn ingredient_categories(&self) -> Result<Vec<String>, ClientError> {
        let path = "/api/ingredientes/categorias";
        into_data(path, self.get_json(path).await?)
    }

    /// Whether the recommendation models are trained, and over how many recipes
    pub async fn status(&self) -> Result<SystemStatus, ClientError> {
        let path = "/api/recomendaciones/estado";
        into_data(path, self.get_json(path).await?)
    }

    async fn download(&self, path: &str, response: Response) -> Result<Vec<u8>, ClientError> {
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        if is_json {
            // The PDF endpoints answer with a JSON envelope when they fail
            let envelope: ApiResponse<serde_json::Value> = read_envelope(path, response).await?;
            return Err(ClientError::Api {
                error: failure_reason(&envelope),
            });
        }
        if !status.is_success() {
            warn!("{} returned HTTP {}", path, status);
            return Err(ClientError::Api {
                error: Some(format!("HTTP {}", status)),
            });
        }

        let bytes = response.bytes().await?;
        info!("Downloaded {} bytes from {}", bytes.len(), path);
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl RecommendationBackend for ApiClient {
    async fn recommend_by_ingredients(
        &self,
        ingredients: &[String],
        max_results: u32,
    ) -> Result<Recommendations<Vec<RecipeSummary>>, ClientError> {
        if ingredients.is_empty() {
            return Err(ClientError::Validation(
                "At least one ingredient is required".to_string(),
            ));
        }
        let path = "/api/recomendaciones/por-ingredientes";
        let envelope = self
            .post_json(
                path,
                &IngredientSearchRequest {
                    ingredientes: ingredients,
                    max_resultados: max_results,
                },
            )
            .await?;
        into_recommendations(path, envelope)
    }

    async fn recommend_by_query(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Recommendations<QueryResults>, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::Validation("Query cannot be empty".to_string()));
        }
        let path = "/api/recomendaciones/consulta";
        let envelope = self
            .post_json(
                path,
                &QueryRequest {
                    consulta: query,
                    max_resultados: max_results,
                },
            )
            .await?;
        into_recommendations(path, envelope)
    }

    async fn recipe_detail(&self, id: u64) -> Result<RecipeDetail, ClientError> {
        let path = format!("/api/recetas/{}", id);
        into_data(&path, self.get_json(&path).await?)
    }

    async fn save_preferences(
        &self,
        restrictions: &[String],
        allergies: &[String],
    ) -> Result<Option<String>, ClientError> {
        let path = "/api/recomendaciones/preferencias";
        let envelope: ApiResponse<serde_json::Value> = self
            .post_json(
                path,
                &PreferencesRequest {
                    restricciones: restrictions,
                    alergias: allergies,
                },
            )
            .await?;
        into_message(envelope)
    }

    async fn retrain(&self) -> Result<Option<String>, ClientError> {
        let path = "/api/recomendaciones/entrenar";
        let envelope: ApiResponse<serde_json::Value> =
            self.post_json(path, &serde_json::json!({})).await?;
        into_message(envelope)
    }

    async fn similar_recipes(
        &self,
        id: u64,
        max_results: u32,
    ) -> Result<Recommendations<Vec<RecipeSummary>>, ClientError> {
        let path = format!("/api/recomendaciones/similares/{}", id);
        let envelope = self
            .get_json_query(&path, &[("max_resultados", max_results)])
            .await?;
        into_recommendations(&path, envelope)
    }

    async fn send_feedback(
        &self,
        id: u64,
        score: u8,
        comment: &str,
    ) -> Result<Option<String>, ClientError> {
        if !(1..=5).contains(&score) {
            return Err(ClientError::Validation(format!(
                "Score must be between 1 and 5, got {}",
                score
            )));
        }
        let path = "/api/recomendaciones/feedback";
        let envelope: ApiResponse<serde_json::Value> = self
            .post_json(
                path,
                &FeedbackRequest {
                    receta_id: id,
                    puntuacion: score,
                    comentario: comment,
                },
            )
            .await?;
        into_message(envelope)
    }

    async fn recipe_pdf(&self, id: u64, options: PdfOptions) -> Result<Vec<u8>, ClientError> {
        let path = format!("/api/recetas/{}/pdf", id);
        let response = self
            .client
            .get(self.url(&path))
            .query(&options)
            .send()
            .await?;
        self.download(&path, response).await
    }

    async fn recommendations_pdf(
        &self,
        ids: &[u64],
        title: Option<&str>,
    ) -> Result<Vec<u8>, ClientError> {
        if ids.is_empty() {
            return Err(ClientError::Validation(
                "No recipes selected for the PDF".to_string(),
            ));
        }
        let path = "/api/recomendaciones/pdf";
        let response = self
            .client
            .post(self.url(path))
            .json(&PdfRequest {
                recetas_ids: ids,
                titulo: title,
            })
            .send()
            .await?;
        self.download(path, response).await
    }
}

/// Parses the body as a JSON envelope regardless of the HTTP status.
///
/// Failed requests still carry `{success: false, error}`, so the status code
/// alone says nothing about which failure kind occurred.
async fn read_envelope<T: DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<ApiResponse<T>, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    debug!("{} -> HTTP {}: {}", endpoint, status, body);

    serde_json::from_str(&body).map_err(|source| {
        warn!("Invalid JSON from {}: {}", endpoint, source);
        ClientError::MalformedResponse {
            endpoint: endpoint.to_string(),
            source,
        }
    })
}

fn failure_reason<T>(envelope: &ApiResponse<T>) -> Option<String> {
    envelope.error.clone().or_else(|| envelope.message.clone())
}

fn into_data<T>(endpoint: &str, envelope: ApiResponse<T>) -> Result<T, ClientError> {
    if !envelope.success {
        return Err(ClientError::Api {
            error: failure_reason(&envelope),
        });
    }
    envelope
        .data
        .ok_or_else(|| ClientError::MalformedResponse {
            endpoint: endpoint.to_string(),
            source: serde_json::Error::custom("missing field `data`"),
        })
}

fn into_recommendations<T>(
    endpoint: &str,
    mut envelope: ApiResponse<T>,
) -> Result<Recommendations<T>, ClientError> {
    let method = envelope.metodo_usado.take();
    let data = into_data(endpoint, envelope)?;
    Ok(Recommendations { data, method })
}

fn into_message<T>(envelope: ApiResponse<T>) -> Result<Option<String>, ClientError> {
    if envelope.success {
        Ok(envelope.message)
    } else {
        Err(ClientError::Api {
            error: failure_reason(&envelope),
        })
    }
}
