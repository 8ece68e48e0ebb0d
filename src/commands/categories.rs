use crate::api::WebApp;
use crate::commands::Out;
use crate::{Config, Mode, Result};

/// Shows the category names.
pub async fn list_categories(config: Config, mode: Mode) -> Result<Out<Vec<String>>> {
    let mut app = WebApp::new(&config, mode);
    let categories = app.fetch_categories().await?;
    let message = if categories.is_empty() {
        "No categories defined yet".to_string()
    } else {
        categories.join("\n")
    };
    Ok(Out::new(message, categories))
}

/// Replaces the whole category list.
pub async fn save_categories(config: Config, mode: Mode, names: &[String]) -> Result<Out<()>> {
    let mut app = WebApp::new(&config, mode);
    app.save_categories(names).await?;
    Ok(Out::new_message(format!(
        "Saved {} categories",
        names.len()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_and_save() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), "https://example.com/exec")
            .await
            .unwrap();
        let out = list_categories(config, Mode::Test).await.unwrap();
        assert!(out.message().contains("salary"));

        let config = Config::load(dir.path()).await.unwrap();
        let names = vec!["rent".to_string(), "food".to_string()];
        let out = save_categories(config, Mode::Test, &names).await.unwrap();
        assert_eq!(out.message(), "Saved 2 categories");
    }
}
