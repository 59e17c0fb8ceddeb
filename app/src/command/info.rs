use planbot_config::Config;
use planbot_store::TranscriptRepository;
use tracing::info;

/// Strategy for displaying configuration and connectivity status.
///
/// Credentials are masked; the database connection is actually attempted so
/// operators can verify the deployment before starting the bot.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::from_env()?;

        println!("=== planbot Configuration ===\n");

        println!("Telegram:");
        println!("  Token: {}", mask(&config.telegram.token));
        println!();

        println!("OpenAI:");
        println!("  API Key: {}", mask(&config.openai.api_key));
        println!("  Model: {}", config.openai.model);
        println!();

        println!("Database:");
        println!("  Host: {}", config.database.host);
        println!("  Name: {}", config.database.name);
        println!("  App Name: {}", config.database.app_name);

        info!("Testing database connection");
        match TranscriptRepository::connect(&config.database.url()).await {
            Ok(repository) => {
                println!("  Status: Connected");
                match repository.count().await {
                    Ok(count) => println!("  Transcripts: {count}"),
                    Err(e) => println!("  Transcripts: unavailable ({e})"),
                }
            }
            Err(e) => {
                println!("  Status: Connection failed");
                println!("  Error: {e}");
            }
        }

        Ok(())
    }
}

fn mask(secret: &str) -> String {
    if secret.len() > 8 {
        format!("{}...{}", &secret[..4], &secret[secret.len() - 4..])
    } else {
        "***".to_string()
    }
}
