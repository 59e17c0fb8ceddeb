use crate::entity::transcripts;
use async_trait::async_trait;
use planbot_core::{Transcript, TranscriptStore};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, Schema, Set,
};
use tracing::info;

fn is_already_exists_error(err: &DbErr) -> bool {
    err.to_string().contains("already exists")
}

/// Append-only repository over the `transcripts` table.
pub struct TranscriptRepository {
    db: DatabaseConnection,
}

impl TranscriptRepository {
    /// Connect to the database and ensure the table exists.
    ///
    /// Connection failure is fatal to the caller; there is no retry here.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to transcript database");
        let db = Database::connect(database_url).await?;

        let backend = db.get_database_backend();
        let schema = Schema::new(backend);
        let stmt = schema.create_table_from_entity(transcripts::Entity);
        match db
            .execute_unprepared(&backend.build(&stmt).to_string())
            .await
        {
            Ok(_) => {}
            Err(e) if is_already_exists_error(&e) => {
                info!("Transcripts table already exists, skipping creation");
            }
            Err(e) => return Err(e.into()),
        }

        info!("TranscriptRepository initialized");
        Ok(Self { db })
    }

    /// Delete every stored transcript and return the deleted count.
    ///
    /// Operator utility, not part of the conversational flow.
    pub async fn purge_all(&self) -> anyhow::Result<u64> {
        let result = transcripts::Entity::delete_many().exec(&self.db).await?;

        info!("Purged {} transcripts", result.rows_affected);
        Ok(result.rows_affected)
    }

    /// Number of stored transcripts.
    pub async fn count(&self) -> anyhow::Result<u64> {
        Ok(transcripts::Entity::find().count(&self.db).await?)
    }
}

#[async_trait]
impl TranscriptStore for TranscriptRepository {
    async fn insert(&self, transcript: &Transcript) -> anyhow::Result<()> {
        let model = transcripts::ActiveModel {
            id: Set(transcript.id),
            chat_id: Set(transcript.chat_id),
            answers: Set(serde_json::to_value(transcript.profile)?),
            recommendation: Set(transcript.recommendation.clone()),
            created_at: Set(transcript.created_at.naive_utc()),
        };

        model.insert(&self.db).await?;

        info!(
            "Persisted transcript {} for chat {}",
            transcript.id, transcript.chat_id
        );
        Ok(())
    }
}
