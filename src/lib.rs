//! Client for the Chef Virtual recipe recommendation service.
//!
//! The crate covers the browser-side half of the application: picking
//! ingredients and allergies, calling the recommendation endpoints, and
//! rendering the returned recipes as HTML fragments.
//!
//! ```no_run
//! # use chef_client::{Session, ClientConfig, View};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::from_config(&ClientConfig::load()?)?;
//! session.add_ingredient("pollo");
//! session.add_ingredient("arroz");
//! if let View::Results { html, .. } = session.search_by_ingredients().await {
//!     println!("{}", html);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod render;
pub mod selection;
pub mod session;

pub use builder::ApiClientBuilder;
pub use client::{ApiClient, RecommendationBackend};
pub use config::ClientConfig;
pub use error::{ClientError, FailureKind};
pub use model::{
    Ingredient, IngredientFilter, PdfOptions, QueryAnalysis, QueryResults, RecipeDetail,
    RecipeFilter, RecipeSummary, Recommendations, SystemStatus,
};
pub use notify::{Notifier, Severity, Toast};
pub use render::{EmptyKind, MessageLevel, Renderer};
pub use selection::{AddOutcome, Selection, SelectionList};
pub use session::{Session, View};

/// Client built from `chef-client.toml` and `CHEF__*` environment variables
pub fn client_from_env() -> Result<ApiClient, ClientError> {
    let config = ClientConfig::load()?;
    ApiClient::builder().config(&config).build()
}
