use std::path::{Path, PathBuf};

use chef_client::{
    ApiClient, ClientConfig, Ingredient, IngredientFilter, PdfOptions, RecipeFilter,
    RecommendationBackend, Session, View,
};
use clap::{Parser, Subcommand};
use log::debug;

/// Chef Virtual - recipe recommendations from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root URL of the recommendation service (overrides configuration)
    #[arg(long, env = "CHEF__BASE_URL")]
    base_url: Option<String>,

    /// Write rendered HTML to this file instead of stdout
    #[arg(long, short, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recommend recipes for a list of ingredients
    Ingredients {
        #[arg(required = true)]
        ingredients: Vec<String>,
        /// Save the recommended recipes as a single PDF
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Recommend recipes for a free-text request
    Query { text: String },
    /// Show one recipe in full
    Recipe {
        id: u64,
        /// Also save the recipe as PDF
        #[arg(long)]
        pdf: Option<PathBuf>,
        /// Leave the nutrition section out of the PDF
        #[arg(long)]
        no_nutrition: bool,
        /// Leave the substitutes section out of the PDF
        #[arg(long)]
        no_substitutes: bool,
    },
    /// Recipes similar to the given one
    Similar { id: u64 },
    /// Save dietary restrictions and allergies
    Preferences {
        #[arg(long = "restriction")]
        restrictions: Vec<String>,
        #[arg(long = "allergy")]
        allergies: Vec<String>,
    },
    /// Retrain the recommendation models
    Retrain,
    /// Download several recipes as one PDF
    Pdf {
        #[arg(required = true)]
        ids: Vec<u64>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        file: PathBuf,
    },
    /// Show whether the models are trained
    Status,
    /// Rate a recipe from 1 to 5
    Feedback {
        id: u64,
        score: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// List recipes, optionally filtered
    Recipes {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        max_time: Option<u32>,
        #[arg(long)]
        name: Option<String>,
    },
    /// The most recently added recipes
    Recent {
        #[arg(default_value_t = 10)]
        limit: u32,
    },
    /// List known categories and difficulty levels
    Categories,
    /// Browse the ingredient catalog
    Catalog {
        /// Show a single ingredient
        #[arg(long, conflicts_with_all = ["category", "name", "allergens", "gluten_free"])]
        id: Option<u64>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// Only ingredients flagged as allergens
        #[arg(long, conflicts_with = "gluten_free")]
        allergens: bool,
        /// Only gluten-free ingredients
        #[arg(long)]
        gluten_free: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = ClientConfig::load()?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    debug!("{:?}", config);

    let mut session = Session::from_config(&config)?;
    let out = args.out.as_deref();

    match args.command {
        Commands::Ingredients { ingredients, pdf } => {
            for ingredient in &ingredients {
                session.add_ingredient(ingredient);
            }
            let html = session.search_by_ingredients().await.html().to_string();
            emit(out, &html).await?;
            if let Some(path) = pdf {
                if let Some(bytes) = session.download_results_pdf(None).await {
                    tokio::fs::write(&path, bytes).await?;
                }
            }
        }
        Commands::Query { text } => {
            let html = session.search_by_query(&text).await.html().to_string();
            emit(out, &html).await?;
        }
        Commands::Recipe {
            id,
            pdf,
            no_nutrition,
            no_substitutes,
        } => {
            let html = match session.view_recipe(id).await {
                View::Detail { title, html } => {
                    format!("<h2>{}</h2>\n{}", html_escape::encode_text(title), html)
                }
                other => other.html().to_string(),
            };
            emit(out, &html).await?;
            if let Some(path) = pdf {
                let options = PdfOptions {
                    include_nutrition: !no_nutrition,
                    include_substitutes: !no_substitutes,
                };
                if let Some(bytes) = session.download_recipe_pdf(options).await {
                    tokio::fs::write(&path, bytes).await?;
                }
            }
        }
        Commands::Similar { id } => {
            let html = session.similar_recipes(id).await.html().to_string();
            emit(out, &html).await?;
        }
        Commands::Preferences {
            restrictions,
            allergies,
        } => {
            for restriction in &restrictions {
                session.set_restriction(restriction, true);
            }
            for allergy in &allergies {
                session.add_allergy(allergy);
            }
            let html = session.save_preferences().await.html().to_string();
            emit(out, &html).await?;
        }
        Commands::Retrain => {
            let html = session.retrain().await.html().to_string();
            emit(out, &html).await?;
        }
        Commands::Pdf { ids, title, file } => {
            let bytes = session
                .backend()
                .recommendations_pdf(&ids, title.as_deref())
                .await?;
            tokio::fs::write(&file, bytes).await?;
            println!("Saved {}", file.display());
        }
        Commands::Status => {
            let status = session.backend().status().await?;
            println!(
                "trained: {}\nrecipes: {}\nalgorithms: {}",
                status.modelo_entrenado,
                status.num_recetas,
                status.algoritmos_disponibles.join(", ")
            );
        }
        Commands::Feedback { id, score, comment } => {
            session.send_feedback(id, score, &comment).await;
        }
        Commands::Recipes {
            category,
            difficulty,
            max_time,
            name,
        } => {
            let filter = RecipeFilter {
                categoria: category,
                dificultad: difficulty,
                tiempo_max: max_time,
                nombre: name,
            };
            let recipes = session.backend().list_recipes(&filter).await?;
            let html = session.renderer().recipe_grid(&recipes);
            emit(out, &html).await?;
        }
        Commands::Recent { limit } => {
            let recipes = session.backend().recent_recipes(limit).await?;
            let html = session.renderer().recipe_grid(&recipes);
            emit(out, &html).await?;
        }
        Commands::Categories => {
            let client: &ApiClient = session.backend();
            println!("categories: {}", client.categories().await?.join(", "));
            println!("difficulties: {}", client.difficulties().await?.join(", "));
            println!(
                "ingredient categories: {}",
                client.ingredient_categories().await?.join(", ")
            );
        }
        Commands::Catalog {
            id,
            category,
            name,
            allergens,
            gluten_free,
        } => {
            let client = session.backend();
            let ingredients = match id {
                Some(id) => vec![client.ingredient(id).await?],
                None if allergens => client.allergens().await?,
                None if gluten_free => client.gluten_free().await?,
                None => {
                    let filter = IngredientFilter {
                        categoria: category,
                        nombre: name,
                    };
                    client.ingredients(&filter).await?
                }
            };
            print_ingredients(&ingredients);
        }
    }

    for toast in session.take_toasts() {
        eprintln!("{}", toast);
    }
    Ok(())
}

fn print_ingredients(ingredients: &[Ingredient]) {
    for ingredient in ingredients {
        let mut line = format!("{:>4}  {}", ingredient.id, ingredient.nombre);
        if let Some(category) = &ingredient.categoria {
            line.push_str(&format!(" ({})", category));
        }
        if ingredient.es_alergeno {
            line.push_str(" [alérgeno]");
        }
        if ingredient.contiene_gluten {
            line.push_str(" [gluten]");
        }
        println!("{}", line);
    }
}

async fn emit(out: Option<&Path>, html: &str) -> std::io::Result<()> {
    match out {
        Some(path) => tokio::fs::write(path, html).await,
        None => {
            println!("{}", html);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_base_url_env_matches_config_loader() {
        let command = Args::command();
        let base_url = command
            .get_arguments()
            .find(|arg| arg.get_id() == "base_url")
            .unwrap();
        assert_eq!(base_url.get_env(), Some(OsStr::new("CHEF__BASE_URL")));
    }

    #[test]
    fn test_recipe_pdf_flags() {
        let args = Args::try_parse_from(["chef-client", "recipe", "4", "--no-nutrition"]).unwrap();
        match args.command {
            Commands::Recipe {
                id,
                no_nutrition,
                no_substitutes,
                ..
            } => {
                assert_eq!(id, 4);
                assert!(no_nutrition);
                assert!(!no_substitutes);
            }
            other => panic!("Expected recipe command, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_id_conflicts_with_filters() {
        assert!(Args::try_parse_from(["chef-client", "catalog", "--allergens"]).is_ok());
        assert!(
            Args::try_parse_from(["chef-client", "catalog", "--id", "3", "--allergens"]).is_err()
        );
    }
}
