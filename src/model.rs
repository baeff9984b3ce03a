use serde::{Deserialize, Serialize};
use std::fmt;

/// Lightweight recipe record returned by the search endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: u64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Preparation time in minutes
    #[serde(default)]
    pub tiempo_preparacion: Option<u32>,
    #[serde(default)]
    pub porciones: Option<u32>,
    #[serde(default)]
    pub dificultad: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    /// Path relative to the static prefix
    #[serde(default)]
    pub imagen_url: Option<String>,
    #[serde(default)]
    pub calorias: Option<f64>,
    #[serde(default)]
    pub proteinas: Option<f64>,
    #[serde(default)]
    pub carbohidratos: Option<f64>,
    #[serde(default)]
    pub grasas: Option<f64>,
    /// Names of the server-side methods that produced this recommendation
    #[serde(default)]
    pub metodos_usados: Vec<String>,
    #[serde(default)]
    pub score_recomendacion: Option<f64>,
    #[serde(default)]
    pub ingredientes_faltantes: Vec<String>,
    #[serde(default)]
    pub fecha_creacion: Option<String>,
}

/// Full recipe record including steps and ingredient quantities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    #[serde(default)]
    pub ingredientes: Vec<IngredientLine>,
    #[serde(default)]
    pub pasos: Vec<Step>,
    #[serde(default)]
    pub valor_nutricional: Micronutrients,
    #[serde(default)]
    pub restricciones: Vec<DietaryRestriction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    #[serde(default)]
    pub id: Option<u64>,
    pub nombre: String,
    #[serde(default)]
    pub cantidad: Option<Quantity>,
    #[serde(default)]
    pub unidad: Option<String>,
    #[serde(default)]
    pub es_opcional: bool,
}

/// Ingredient amounts arrive either as numbers or as free text ("al gusto")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) => f.write_str(&format_number(*n)),
            Quantity::Text(t) => f.write_str(t),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub numero: u32,
    pub descripcion: String,
}

/// Vitamins and minerals; the server sends `{}` when none are recorded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Micronutrients {
    #[serde(default)]
    pub vitamina_a: Option<f64>,
    #[serde(default)]
    pub vitamina_c: Option<f64>,
    #[serde(default)]
    pub vitamina_d: Option<f64>,
    #[serde(default)]
    pub vitamina_e: Option<f64>,
    #[serde(default)]
    pub calcio: Option<f64>,
    #[serde(default)]
    pub hierro: Option<f64>,
    #[serde(default)]
    pub potasio: Option<f64>,
    #[serde(default)]
    pub otros_nutrientes: Option<String>,
}

impl Micronutrients {
    /// Labelled values that are present, in display order
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        [
            ("Vitamina A", self.vitamina_a),
            ("Vitamina C", self.vitamina_c),
            ("Vitamina D", self.vitamina_d),
            ("Vitamina E", self.vitamina_e),
            ("Calcio", self.calcio),
            ("Hierro", self.hierro),
            ("Potasio", self.potasio),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
            && self
                .otros_nutrientes
                .as_deref()
                .map_or(true, |s| s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DietaryRestriction {
    #[serde(default)]
    pub id: Option<u64>,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

/// What the server understood from a free-text query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    #[serde(default)]
    pub ingredientes: Vec<String>,
    #[serde(default)]
    pub restricciones: Vec<String>,
    #[serde(default)]
    pub alergias: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResults {
    #[serde(default)]
    pub recomendaciones: Vec<RecipeSummary>,
    #[serde(default)]
    pub analisis: Option<QueryAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub modelo_entrenado: bool,
    #[serde(default)]
    pub algoritmos_disponibles: Vec<String>,
    #[serde(default)]
    pub num_recetas: u64,
}

/// Catalog ingredient, as listed by `/api/ingredientes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: u64,
    pub nombre: String,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub es_alergeno: bool,
    #[serde(default)]
    pub contiene_gluten: bool,
    /// Free-form JSON kept as the server stores it
    #[serde(default)]
    pub info_nutricional: Option<serde_json::Value>,
}

/// Envelope shared by every JSON endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub metodo_usado: Option<String>,
}

/// Recommendations plus the method label the server reported
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations<T> {
    pub data: T,
    pub method: Option<String>,
}

// Request payloads

#[derive(Debug, Serialize)]
pub struct IngredientSearchRequest<'a> {
    pub ingredientes: &'a [String],
    pub max_resultados: u32,
}

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub consulta: &'a str,
    pub max_resultados: u32,
}

#[derive(Debug, Serialize)]
pub struct PreferencesRequest<'a> {
    pub restricciones: &'a [String],
    pub alergias: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct PdfRequest<'a> {
    pub recetas_ids: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackRequest<'a> {
    pub receta_id: u64,
    pub puntuacion: u8,
    pub comentario: &'a str,
}

/// Filters for the recipe listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dificultad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiempo_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
}

/// Filters for the ingredient listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngredientFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
}

/// Sections of the single-recipe PDF. Both are included by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PdfOptions {
    pub include_nutrition: bool,
    pub include_substitutes: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            include_nutrition: true,
            include_substitutes: true,
        }
    }
}

/// Formats a number without a trailing `.0` for whole values
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
