//! Print the models visible to the configured `GEMINI_API_KEY`.
//!
//! Handy for finding the current Imagen model id when Google renames it.

use imagegate_generation::config::non_empty_var;
use imagegate_generation::gemini::API_BASE;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelList {
    #[serde(default)]
    models: Vec<Model>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Model {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let Some(api_key) = non_empty_var("GEMINI_API_KEY") else {
        eprintln!("GEMINI_API_KEY not found in .env");
        std::process::exit(1);
    };

    match fetch_models(&api_key).await {
        Ok(list) => {
            println!("Available Models:");
            for model in list.models {
                println!(
                    "- {} ({})",
                    model.name,
                    model.supported_generation_methods.join(", ")
                );
            }
        }
        Err(e) => eprintln!("Error listing models: {e}"),
    }
}

#[derive(Debug, thiserror::Error)]
enum ListModelsError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

async fn fetch_models(api_key: &str) -> Result<ModelList, ListModelsError> {
    let response = reqwest::Client::new()
        .get(format!("{API_BASE}/models"))
        .query(&[("key", api_key)])
        .send()
        .await
        .map_err(reqwest::Error::without_url)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ListModelsError::Rejected { status, body });
    }

    let list = response
        .json::<ModelList>()
        .await
        .map_err(reqwest::Error::without_url)?;
    Ok(list)
}
