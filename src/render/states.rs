use super::{esc, Renderer};
use crate::notify::Toast;

/// Which search produced no results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    Ingredients,
    Query,
    Similar,
}

struct EmptyCopy {
    icon: &'static str,
    title: &'static str,
    message: &'static str,
    suggestion: &'static str,
}

impl EmptyKind {
    fn copy(self) -> EmptyCopy {
        match self {
            EmptyKind::Ingredients => EmptyCopy {
                icon: "bi-basket2",
                title: "No se encontraron recetas",
                message: "Intenta agregando más ingredientes o usa términos diferentes",
                suggestion: "Sugerencia: Usa ingredientes comunes como pollo, tomate, cebolla...",
            },
            EmptyKind::Query => EmptyCopy {
                icon: "bi-chat-dots",
                title: "No hay resultados",
                message: "Tu consulta no coincide con ninguna receta disponible",
                suggestion:
                    "Sugerencia: Intenta ser más específico o usa términos culinarios comunes",
            },
            EmptyKind::Similar => EmptyCopy {
                icon: "bi-shuffle",
                title: "Sin recetas similares",
                message: "No encontramos recetas parecidas a esta",
                suggestion: "Sugerencia: Explora otras recetas por ingredientes o consulta",
            },
        }
    }
}

/// Alert level of an inline message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Danger,
    Warning,
    Info,
}

impl MessageLevel {
    pub fn alert_class(self) -> &'static str {
        match self {
            MessageLevel::Success => "alert-success",
            MessageLevel::Danger => "alert-danger",
            MessageLevel::Warning => "alert-warning",
            MessageLevel::Info => "alert-info",
        }
    }
}

impl Renderer {
    pub fn empty_state(&self, kind: EmptyKind) -> String {
        let copy = kind.copy();
        format!(
            r#"<div class="text-center py-5 empty-state" data-kind="{:?}">
<div class="mb-4"><i class="bi {} display-1 text-muted opacity-25"></i></div>
<h5 class="text-muted mb-3">{}</h5>
<p class="text-muted mb-4">{}</p>
<div class="alert alert-light border-0"><i class="bi bi-lightbulb text-warning me-2"></i>{}</div>
<button class="btn btn-outline-primary" data-action="reset"><i class="bi bi-arrow-clockwise me-2"></i>Intentar de nuevo</button>
</div>
"#,
            kind, copy.icon, copy.title, copy.message, copy.suggestion
        )
    }

    pub fn message(&self, text: &str, level: MessageLevel) -> String {
        format!(
            r#"<div class="alert {} border-0" role="alert"><div class="d-flex align-items-center"><i class="bi bi-info-circle-fill me-3"></i><div>{}</div></div></div>
"#,
            level.alert_class(),
            esc(text)
        )
    }

    pub fn loading(&self, text: &str) -> String {
        format!(
            r#"<div class="text-center py-5 loading"><div class="spinner-border text-primary" role="status"><span class="visually-hidden">Cargando...</span></div><h5 class="text-primary mt-4"><i class="bi bi-robot me-2"></i>{}</h5></div>
"#,
            esc(text)
        )
    }

    /// Toast element with the severity icon in its header
    pub fn toast(&self, toast: &Toast) -> String {
        format!(
            r#"<div class="toast toast-{}" role="alert"><div class="toast-header"><i class="bi {} me-2"></i><strong class="me-auto">Chef Virtual</strong></div><div class="toast-body">{}</div></div>
"#,
            toast.severity.as_str(),
            toast.severity.icon(),
            esc(&toast.message)
        )
    }

    /// Error body for the detail modal
    pub fn detail_error(&self, text: &str) -> String {
        format!(
            r#"<div class="alert alert-danger detail-error">{}</div>"#,
            esc(text)
        )
    }
}
