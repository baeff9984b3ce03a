use super::{attr, esc, number_or, present, Renderer};
use crate::model::{format_number, IngredientLine, RecipeDetail};

impl Renderer {
    /// Body of the recipe detail modal
    pub fn recipe_detail(&self, recipe: &RecipeDetail) -> String {
        let summary = &recipe.summary;
        let image = present(summary.imagen_url.as_deref());
        let mut html = String::from(r#"<div class="container-fluid p-4 recipe-detail"><div class="row">"#);

        if let Some(image) = image {
            html.push_str(&format!(
                r#"<div class="col-md-4 mb-4"><img src="{}" class="img-fluid rounded shadow" alt="{}"></div>"#,
                attr(&self.image_src(image)),
                attr(&summary.nombre)
            ));
        }

        html.push_str(&format!(
            r#"<div class="col-md-{} mb-4">"#,
            if image.is_some() { 8 } else { 12 }
        ));
        if let Some(description) = present(summary.descripcion.as_deref()) {
            html.push_str(&format!(r#"<p class="lead">{}</p>"#, esc(description)));
        }
        html.push_str(&format!(
            r#"<div class="row g-3 mb-4 detail-stats">
<div class="col-md-3 text-center"><div class="fw-bold">{}</div><small>minutos</small></div>
<div class="col-md-3 text-center"><div class="fw-bold">{}</div><small>porciones</small></div>
<div class="col-md-3 text-center"><div class="fw-bold">{}</div><small>dificultad</small></div>
<div class="col-md-3 text-center"><div class="fw-bold">{}</div><small>categoría</small></div>
</div>"#,
            number_or(summary.tiempo_preparacion.map(f64::from), "N/A"),
            number_or(summary.porciones.map(f64::from), "N/A"),
            esc(present(summary.dificultad.as_deref()).unwrap_or("Media")),
            esc(present(summary.categoria.as_deref()).unwrap_or("General"))
        ));
        if !recipe.restricciones.is_empty() {
            let badges: String = recipe
                .restricciones
                .iter()
                .map(|r| {
                    format!(
                        r#"<span class="badge bg-secondary me-1 restriction" title="{}">{}</span>"#,
                        attr(r.descripcion.as_deref().unwrap_or_default()),
                        esc(&r.nombre)
                    )
                })
                .collect();
            html.push_str(&format!(r#"<div class="mb-3">{}</div>"#, badges));
        }
        html.push_str("</div></div>\n");

        html.push_str(r#"<div class="row">"#);
        html.push_str(&format!(
            r#"<div class="col-md-6 mb-4"><div class="card h-100"><div class="card-header bg-warning text-dark"><h5 class="card-title mb-0"><i class="bi bi-basket2-fill me-2"></i>Ingredientes</h5></div><div class="card-body"><div class="list-group list-group-flush">{}</div></div></div></div>"#,
            recipe
                .ingredientes
                .iter()
                .map(ingredient_row)
                .collect::<String>()
        ));
        html.push_str(&self.detail_nutrition(recipe));
        html.push_str("</div>\n");

        if !recipe.valor_nutricional.is_empty() {
            html.push_str(&self.micronutrients(recipe));
        }

        let mut steps = recipe.pasos.clone();
        steps.sort_by_key(|step| step.numero);
        let steps: String = steps
            .iter()
            .map(|step| {
                format!(
                    r#"<div class="col-12 mb-3 step"><div class="d-flex align-items-start"><div class="step-number bg-primary text-white rounded-circle me-3">{}</div><p class="mb-0 flex-grow-1">{}</p></div></div>"#,
                    step.numero,
                    esc(&step.descripcion)
                )
            })
            .collect();
        html.push_str(&format!(
            r#"<div class="card"><div class="card-header bg-info text-white"><h5 class="card-title mb-0"><i class="bi bi-list-ol me-2"></i>Preparación</h5></div><div class="card-body"><div class="row">{}</div></div></div>"#,
            steps
        ));

        html.push_str("</div>\n");
        html
    }

    fn detail_nutrition(&self, recipe: &RecipeDetail) -> String {
        let summary = &recipe.summary;
        let cells = [
            ("text-danger", number_or(summary.calorias, "0"), "", "Calorías"),
            ("text-primary", number_or(summary.proteinas, "0"), "g", "Proteínas"),
            ("text-warning", number_or(summary.carbohidratos, "0"), "g", "Carbohidratos"),
            ("text-info", number_or(summary.grasas, "0"), "g", "Grasas"),
        ];
        let cells: String = cells
            .iter()
            .map(|(class, value, unit, label)| {
                format!(
                    r#"<div class="col-6"><div class="text-center p-2 bg-light rounded"><div class="fw-bold {class} fs-5">{value}{unit}</div><small class="text-muted">{label}</small></div></div>"#
                )
            })
            .collect();
        format!(
            r#"<div class="col-md-6 mb-4"><div class="card h-100 detail-nutrition"><div class="card-header bg-success text-white"><h5 class="card-title mb-0"><i class="bi bi-bar-chart-fill me-2"></i>Información Nutricional</h5></div><div class="card-body"><div class="row g-3">{cells}</div></div></div></div>"#
        )
    }

    fn micronutrients(&self, recipe: &RecipeDetail) -> String {
        let micros = &recipe.valor_nutricional;
        let mut rows: String = micros
            .entries()
            .into_iter()
            .map(|(label, value)| {
                format!(
                    "<tr><th scope=\"row\">{}</th><td>{}</td></tr>",
                    label,
                    format_number(value)
                )
            })
            .collect();
        if let Some(other) = present(micros.otros_nutrientes.as_deref()) {
            rows.push_str(&format!(
                "<tr><th scope=\"row\">Otros</th><td>{}</td></tr>",
                esc(other)
            ));
        }
        format!(
            r#"<div class="card mb-4 micronutrients"><div class="card-header bg-light"><h6 class="mb-0">Vitaminas y minerales</h6></div><table class="table table-sm mb-0">{}</table></div>"#,
            rows
        )
    }
}

fn ingredient_row(line: &IngredientLine) -> String {
    let optional = if line.es_opcional {
        r#" <small class="text-muted">(opcional)</small>"#
    } else {
        ""
    };
    let quantity = line
        .cantidad
        .as_ref()
        .map(|q| q.to_string())
        .unwrap_or_default();
    let unit = line.unidad.as_deref().unwrap_or_default();
    format!(
        r#"<div class="list-group-item d-flex justify-content-between align-items-center border-0 ingredient"><span><i class="bi bi-check2 text-success me-2"></i>{}{}</span><span class="badge bg-light text-dark">{}</span></div>"#,
        esc(&line.nombre),
        optional,
        esc(format!("{} {}", quantity, unit).trim())
    )
}
