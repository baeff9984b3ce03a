use super::{
    attr, esc, number_or, present, Renderer, DEFAULT_DESCRIPTION, DESCRIPTION_PREVIEW_CHARS,
    MISSING_PREVIEW,
};
use crate::model::{QueryAnalysis, RecipeSummary};
use crate::selection::SelectionList;

/// Display settings for one server-side method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmBadge {
    pub icon: &'static str,
    pub text: String,
    pub class: &'static str,
}

/// Human label for a method name reported by the server
pub fn method_label(method: &str) -> &str {
    match method {
        "contenido_texto" => "Análisis de Texto",
        "contenido_receta" => "Similitud",
        "kmeans" => "K-means",
        "random_forest" => "Random Forest",
        other => other,
    }
}

pub fn algorithm_badge(method: &str) -> AlgorithmBadge {
    let (icon, text, class) = match method {
        "contenido_texto" => ("bi-file-text", "TF-IDF", "bg-primary"),
        "contenido_receta" => ("bi-arrow-repeat", "Similitud", "bg-info"),
        "kmeans" => ("bi-diagram-3", "K-means", "bg-success"),
        "random_forest" => ("bi-tree", "R. Forest", "bg-warning text-dark"),
        other => ("bi-cpu", other, "bg-secondary"),
    };
    AlgorithmBadge {
        icon,
        text: text.to_string(),
        class,
    }
}

impl Renderer {
    /// Results grid with header, algorithm badges and action buttons.
    ///
    /// `method` is the server's `metodo_usado`; the analysis section is
    /// prepended when the query endpoint returned one.
    pub fn results(
        &self,
        recipes: &[RecipeSummary],
        method: Option<&str>,
        analysis: Option<&QueryAnalysis>,
    ) -> String {
        let mut html = String::new();
        if let Some(analysis) = analysis {
            html.push_str(&self.analysis(analysis));
        }

        let method = present(method).unwrap_or("IA");
        html.push_str(&format!(
            r#"<div class="d-flex justify-content-between align-items-center mb-4">
<div><h4 class="mb-1"><i class="bi bi-stars text-primary me-2"></i>Recetas Recomendadas</h4>
<small class="text-muted results-meta"><i class="bi bi-cpu me-1"></i>Generadas por {} • {} resultado(s)</small></div>
<div class="d-flex gap-2 algorithm-badges">{}</div>
</div>
"#,
            esc(method),
            recipes.len(),
            self.algorithm_badges(recipes)
        ));

        html.push_str(r#"<div class="row g-4">"#);
        for (index, recipe) in recipes.iter().enumerate() {
            html.push_str(&self.recipe_card(recipe, index));
        }
        html.push_str("</div>\n");

        html.push_str(
            r#"<div class="row g-2 mt-4">
<div class="col-md-6"><button class="btn btn-success btn-lg w-100" data-action="pdf-multiple"><i class="bi bi-file-earmark-pdf me-2"></i>Descargar todas en PDF</button></div>
<div class="col-md-6"><button class="btn btn-info btn-lg w-100" data-action="retrain"><i class="bi bi-arrow-clockwise me-2"></i>Reentrenar IA</button></div>
</div>
"#,
        );
        html
    }

    /// Union of `metodos_usados` across the results, in first-seen order
    pub fn algorithm_badges(&self, recipes: &[RecipeSummary]) -> String {
        let mut seen: Vec<&str> = Vec::new();
        for method in recipes.iter().flat_map(|r| r.metodos_usados.iter()) {
            if !seen.contains(&method.as_str()) {
                seen.push(method);
            }
        }

        seen.into_iter()
            .map(|method| {
                let badge = algorithm_badge(method);
                format!(
                    r#"<span class="badge {} px-3 py-2"><i class="{} me-1"></i>{}</span>"#,
                    badge.class,
                    badge.icon,
                    esc(&badge.text)
                )
            })
            .collect()
    }

    /// One recipe card; the first result (`index == 0`) is featured.
    pub fn recipe_card(&self, recipe: &RecipeSummary, index: usize) -> String {
        self.card(recipe, index == 0)
    }

    /// Plain grid of cards with no ranking, for catalog listings
    pub fn recipe_grid(&self, recipes: &[RecipeSummary]) -> String {
        let cards: String = recipes.iter().map(|r| self.card(r, false)).collect();
        format!(r#"<div class="row g-4">{}</div>"#, cards)
    }

    fn card(&self, recipe: &RecipeSummary, featured: bool) -> String {
        let name = esc(&recipe.nombre);
        let mut html = String::new();

        html.push_str(&format!(
            r#"<div class="col-md-6 mb-4"><div class="card h-100 recipe-card{}" data-recipe-id="{}">"#,
            if featured { " featured-recipe border-primary" } else { "" },
            recipe.id
        ));
        if featured {
            html.push_str(r#"<span class="badge bg-primary position-absolute top-0 start-0 m-2 top-badge"><i class="bi bi-star-fill me-1"></i>Top</span>"#);
        }
        html.push_str(&format!(
            r#"<div class="card-header {}"><h5 class="card-title mb-0"><i class="bi bi-bookmark-heart me-2"></i>{}</h5></div>"#,
            if featured { "bg-primary text-white" } else { "bg-light" },
            name
        ));

        if let Some(image) = present(recipe.imagen_url.as_deref()) {
            html.push_str(&format!(
                r#"<div class="position-relative overflow-hidden"><img src="{}" class="card-img-top" alt="{}"><span class="badge bg-dark bg-opacity-75 position-absolute top-0 end-0 m-2"><i class="bi bi-clock me-1"></i>{}min</span></div>"#,
                attr(&self.image_src(image)),
                attr(&recipe.nombre),
                number_or(recipe.tiempo_preparacion.map(f64::from), "N/A")
            ));
        }

        html.push_str(r#"<div class="card-body">"#);
        html.push_str(&format!(
            r#"<p class="card-text text-muted mb-3">{}</p>"#,
            esc(&description_preview(recipe.descripcion.as_deref()))
        ));
        html.push_str(&format!(
            r#"<div class="row g-2 mb-3 text-center card-stats">
<div class="col-4"><small class="fw-bold">{}</small><small class="d-block text-muted">min</small></div>
<div class="col-4"><small class="fw-bold">{}</small><small class="d-block text-muted">porciones</small></div>
<div class="col-4"><small class="fw-bold">{}</small><small class="d-block text-muted">dificultad</small></div>
</div>"#,
            number_or(recipe.tiempo_preparacion.map(f64::from), "N/A"),
            number_or(recipe.porciones.map(f64::from), "N/A"),
            esc(present(recipe.dificultad.as_deref()).unwrap_or("Media"))
        ));

        if recipe.calorias.is_some_and(|c| c != 0.0) {
            html.push_str(&self.nutrition_summary(recipe));
        }

        if !recipe.metodos_usados.is_empty() {
            let labels: Vec<String> = recipe
                .metodos_usados
                .iter()
                .map(|m| esc(method_label(m)))
                .collect();
            html.push_str(&format!(
                r#"<div class="mt-2 methods"><small class="text-info"><i class="bi bi-cpu me-1"></i>{}</small></div>"#,
                labels.join(" • ")
            ));
        }

        if let Some(score) = recipe.score_recomendacion.filter(|s| *s != 0.0) {
            let percent = (score * 100.0).round() as i64;
            html.push_str(&format!(
                r#"<div class="mt-2 score"><small class="text-success me-2"><i class="bi bi-star-fill me-1"></i>Compatibilidad:</small><div class="progress flex-grow-1" style="height: 4px;"><div class="progress-bar bg-success" style="width: {percent}%"></div></div><small class="text-success ms-2">{percent}%</small></div>"#
            ));
        }

        if !recipe.ingredientes_faltantes.is_empty() {
            let shown: Vec<String> = recipe
                .ingredientes_faltantes
                .iter()
                .take(MISSING_PREVIEW)
                .map(|i| esc(i))
                .collect();
            let more = if recipe.ingredientes_faltantes.len() > MISSING_PREVIEW {
                "..."
            } else {
                ""
            };
            html.push_str(&format!(
                r#"<div class="mt-2 missing"><small class="text-danger"><i class="bi bi-exclamation-circle me-1"></i><strong>Te faltan:</strong> {}{}</small></div>"#,
                shown.join(", "),
                more
            ));
        }

        html.push_str("</div>");
        html.push_str(&format!(
            r#"<div class="card-footer bg-transparent"><button class="btn btn-primary w-100" data-action="view-recipe" data-recipe-id="{}"><i class="bi bi-eye me-2"></i>Ver Detalles Completos</button></div>"#,
            recipe.id
        ));
        html.push_str("</div></div>\n");
        html
    }

    /// Calories and macros; missing macros are shown as zero
    pub fn nutrition_summary(&self, recipe: &RecipeSummary) -> String {
        format!(
            r#"<div class="nutrition-summary bg-light rounded p-2 mb-3"><div class="row g-1 text-center">
<div class="col-3"><small class="fw-bold text-danger">{}</small><small class="d-block text-muted">kcal</small></div>
<div class="col-3"><small class="fw-bold text-primary">{}g</small><small class="d-block text-muted">prot</small></div>
<div class="col-3"><small class="fw-bold text-warning">{}g</small><small class="d-block text-muted">carb</small></div>
<div class="col-3"><small class="fw-bold text-info">{}g</small><small class="d-block text-muted">gras</small></div>
</div></div>"#,
            number_or(recipe.calorias, "0"),
            number_or(recipe.proteinas, "0"),
            number_or(recipe.carbohidratos, "0"),
            number_or(recipe.grasas, "0")
        )
    }

    /// Detected ingredients, restrictions and allergies from a free-text query
    pub fn analysis(&self, analysis: &QueryAnalysis) -> String {
        let mut html = String::from(
            r#"<div class="alert alert-info border-0 mb-4 query-analysis"><h5 class="mb-3"><i class="bi bi-brain me-3 text-info"></i>Análisis de IA completado</h5><div class="row g-3">"#,
        );

        let sections = [
            (
                &analysis.ingredientes,
                "col-md-6",
                "bi-check-circle-fill text-success",
                "Ingredientes detectados:",
                "bg-success",
            ),
            (
                &analysis.restricciones,
                "col-md-6",
                "bi-shield-check text-warning",
                "Restricciones detectadas:",
                "bg-warning text-dark",
            ),
            (
                &analysis.alergias,
                "col-md-12",
                "bi-exclamation-triangle text-danger",
                "Alergias detectadas:",
                "bg-danger",
            ),
        ];

        for (items, column, icon, title, badge_class) in sections {
            if items.is_empty() {
                continue;
            }
            let badges: String = items
                .iter()
                .map(|item| format!(r#"<span class="badge {}">{}</span>"#, badge_class, esc(item)))
                .collect();
            html.push_str(&format!(
                r#"<div class="{column} analysis-section"><div class="mb-2"><i class="bi {icon} me-2"></i><strong>{title}</strong></div><div class="d-flex flex-wrap gap-1">{badges}</div></div>"#
            ));
        }

        html.push_str("</div></div>\n");
        html
    }

    /// Selected ingredients as removable badges, or the placeholder when empty
    pub fn ingredient_badges(&self, ingredients: &SelectionList) -> String {
        if ingredients.is_empty() {
            return r#"<div class="text-muted text-center py-3 selection-placeholder"><i class="bi bi-inbox fs-1 d-block mb-2 opacity-50"></i><small>Los ingredientes aparecerán aquí...</small></div>"#.to_string();
        }
        selection_badges(ingredients, "bg-primary badge-ingrediente", "bi-check2")
    }

    pub fn allergy_badges(&self, allergies: &SelectionList) -> String {
        selection_badges(allergies, "bg-danger badge-alergia", "bi-exclamation-triangle")
    }
}

fn selection_badges(list: &SelectionList, class: &str, icon: &str) -> String {
    list.items()
        .iter()
        .map(|item| {
            format!(
                r#"<span class="badge {} me-2 mb-2 d-inline-flex align-items-center"><i class="bi {} me-1"></i>{}<button class="btn-close btn-close-white ms-2" data-value="{}"></button></span>"#,
                class,
                icon,
                esc(item),
                attr(item)
            )
        })
        .collect()
}

fn description_preview(description: Option<&str>) -> String {
    match present(description) {
        Some(text) => {
            let preview: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{}...", preview)
        }
        None => DEFAULT_DESCRIPTION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn recipe(id: u64, name: &str) -> RecipeSummary {
        RecipeSummary {
            id,
            nombre: name.to_string(),
            ..Default::default()
        }
    }

    fn count(html: &str, selector: &str) -> usize {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse(selector).unwrap();
        fragment.select(&selector).count()
    }

    #[test]
    fn test_grid_features_nothing() {
        let html = Renderer::default().recipe_grid(&[recipe(1, "Sopa"), recipe(2, "Guiso")]);
        assert_eq!(count(&html, ".recipe-card"), 2);
        assert_eq!(count(&html, ".featured-recipe"), 0);
    }

    #[test]
    fn test_method_labels() {
        assert_eq!(method_label("contenido_texto"), "Análisis de Texto");
        assert_eq!(method_label("random_forest"), "Random Forest");
        assert_eq!(method_label("sistema_hibrido"), "sistema_hibrido");
        assert_eq!(algorithm_badge("contenido_texto").text, "TF-IDF");
        assert_eq!(algorithm_badge("nuevo").class, "bg-secondary");
    }

    #[test]
    fn test_results_render_one_card_per_recipe_and_feature_first() {
        let recipes = vec![recipe(1, "Sopa"), recipe(2, "Guiso"), recipe(3, "Ensalada")];
        let html = Renderer::default().results(&recipes, Some("sistema_hibrido"), None);

        assert_eq!(count(&html, ".recipe-card"), 3);
        assert_eq!(count(&html, ".featured-recipe"), 1);
        assert_eq!(count(&html, ".top-badge"), 1);
        assert!(html.contains("Generadas por sistema_hibrido • 3 resultado(s)"));
    }

    #[test]
    fn test_results_default_method_label() {
        let html = Renderer::default().results(&[recipe(1, "Sopa")], None, None);
        assert!(html.contains("Generadas por IA • 1 resultado(s)"));
    }

    #[test]
    fn test_algorithm_badges_are_deduplicated() {
        let mut first = recipe(1, "Sopa");
        first.metodos_usados = vec!["kmeans".to_string(), "contenido_texto".to_string()];
        let mut second = recipe(2, "Guiso");
        second.metodos_usados = vec!["kmeans".to_string(), "random_forest".to_string()];

        let html = Renderer::default().algorithm_badges(&[first, second]);
        assert_eq!(count(&html, "span.badge"), 3);
        let kmeans = html.find("K-means").unwrap();
        let tfidf = html.find("TF-IDF").unwrap();
        assert!(kmeans < tfidf);
    }

    #[test]
    fn test_card_without_optional_fields_uses_fallbacks() {
        let html = Renderer::default().recipe_card(&recipe(9, "Api"), 1);

        assert!(html.contains(DEFAULT_DESCRIPTION));
        assert!(html.contains("N/A"));
        assert!(html.contains("Media"));
        assert_eq!(count(&html, "img"), 0);
        assert_eq!(count(&html, ".nutrition-summary"), 0);
        assert_eq!(count(&html, ".score"), 0);
        assert_eq!(count(&html, ".missing"), 0);
        assert_eq!(count(&html, ".featured-recipe"), 0);
    }

    #[test]
    fn test_card_with_full_fields() {
        let card = RecipeSummary {
            id: 4,
            nombre: "Majadito".to_string(),
            descripcion: Some("Arroz con charque".to_string()),
            tiempo_preparacion: Some(45),
            porciones: Some(4),
            imagen_url: Some("img/majadito.jpg".to_string()),
            calorias: Some(520.0),
            proteinas: Some(22.5),
            metodos_usados: vec!["kmeans".to_string(), "random_forest".to_string()],
            score_recomendacion: Some(0.876),
            ingredientes_faltantes: vec![
                "charque".to_string(),
                "plátano".to_string(),
                "huevo".to_string(),
                "yuca".to_string(),
            ],
            ..Default::default()
        };
        let html = Renderer::default().recipe_card(&card, 0);

        assert!(html.contains(r#"src="/static/img/majadito.jpg""#));
        assert!(html.contains("Arroz con charque..."));
        assert!(html.contains("520"));
        assert!(html.contains("22.5g"));
        assert!(html.contains("0g"));
        assert!(html.contains("K-means • Random Forest"));
        assert!(html.contains("88%"));
        assert!(html.contains("charque, plátano, huevo..."));
        assert!(!html.contains("yuca"));
    }

    #[test]
    fn test_description_is_truncated() {
        let long = "a".repeat(200);
        let preview = description_preview(Some(&long));
        assert_eq!(preview.len(), DESCRIPTION_PREVIEW_CHARS + 3);
        assert_eq!(description_preview(Some("  ")), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_server_text_is_escaped() {
        let html = Renderer::default().recipe_card(&recipe(1, "<script>alert(1)</script>"), 0);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_analysis_renders_only_non_empty_sections() {
        let analysis = QueryAnalysis {
            ingredientes: vec!["pollo".to_string()],
            restricciones: vec![],
            alergias: vec!["maní".to_string()],
        };
        let html = Renderer::default().analysis(&analysis);

        assert_eq!(count(&html, ".analysis-section"), 2);
        assert!(html.contains("Ingredientes detectados:"));
        assert!(!html.contains("Restricciones detectadas:"));
        assert!(html.contains("maní"));
    }

    #[test]
    fn test_ingredient_placeholder_when_empty() {
        let renderer = Renderer::default();
        let empty = SelectionList::new();
        assert_eq!(count(&renderer.ingredient_badges(&empty), ".selection-placeholder"), 1);

        let list: SelectionList = ["tomate", "cebolla"].into_iter().collect();
        let html = renderer.ingredient_badges(&list);
        assert_eq!(count(&html, ".badge-ingrediente"), 2);
    }
}
