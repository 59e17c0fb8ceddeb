use planbot_config::Config;
use planbot_store::TranscriptRepository;

/// Strategy for clearing the transcripts table.
///
/// Operator maintenance utility; the conversational flow never deletes
/// records.
#[derive(Debug, Clone, Copy)]
pub struct PurgeStrategy;

impl super::CommandStrategy for PurgeStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::from_env()?;
        let repository = TranscriptRepository::connect(&config.database.url()).await?;

        let deleted = repository.purge_all().await?;
        println!("Cleared {deleted} transcripts.");
        Ok(())
    }
}
