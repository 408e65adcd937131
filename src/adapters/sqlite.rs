use crate::domain::model::{Choice, NewChoice, NewPoll, Poll};
use crate::domain::ports::PollStore;
use crate::adapters::vote_limit_reached;
use crate::utils::error::{PollError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;

const SCHEMA: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS polls (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        question TEXT NOT NULL,
        pub_date TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS choices (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        poll_id INTEGER NOT NULL REFERENCES polls(id) ON DELETE CASCADE,
        choice TEXT NOT NULL CHECK (length(choice) > 0),
        votes INTEGER NOT NULL DEFAULT 0 CHECK (votes BETWEEN 0 AND 4294967295)
    )",
];

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `url` and applies the schema.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // every connection to an in-memory database is a separate database
        let max_connections = if url.contains(":memory:") || url.contains("mode=memory") {
            1
        } else {
            max_connections
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        tracing::debug!("SQLite store ready at {}", url);
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn poll_from_row(row: &SqliteRow) -> Result<Poll> {
    Ok(Poll {
        id: row.try_get("id")?,
        question: row.try_get("question")?,
        pub_date: row.try_get("pub_date")?,
    })
}

fn choice_from_row(row: &SqliteRow) -> Result<Choice> {
    let id: i64 = row.try_get("id")?;
    let votes: i64 = row.try_get("votes")?;
    let votes = u32::try_from(votes).map_err(|_| PollError::StorageMessage {
        message: format!("choice {} has out of range vote count {}", id, votes),
    })?;

    Ok(Choice {
        id,
        poll_id: row.try_get("poll_id")?,
        choice: row.try_get("choice")?,
        votes,
    })
}

#[async_trait]
impl PollStore for SqliteStore {
    async fn create_poll(&self, poll: NewPoll) -> Result<Poll> {
        let id = sqlx::query("INSERT INTO polls (question, pub_date) VALUES (?, ?)")
            .bind(&poll.question)
            .bind(poll.pub_date)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(Poll {
            id,
            question: poll.question,
            pub_date: poll.pub_date,
        })
    }

    async fn create_choice(&self, choice: NewChoice) -> Result<Choice> {
        let result = sqlx::query("INSERT INTO choices (poll_id, choice, votes) VALUES (?, ?, ?)")
            .bind(choice.poll_id)
            .bind(&choice.choice)
            .bind(i64::from(choice.votes))
            .execute(&self.pool)
            .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                return Err(PollError::not_found("Poll", choice.poll_id));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Choice {
            id,
            poll_id: choice.poll_id,
            choice: choice.choice,
            votes: choice.votes,
        })
    }

    async fn create_poll_with_choices(
        &self,
        poll: NewPoll,
        choices: Vec<String>,
    ) -> Result<(Poll, Vec<Choice>)> {
        let mut tx = self.pool.begin().await?;

        let poll_id = sqlx::query("INSERT INTO polls (question, pub_date) VALUES (?, ?)")
            .bind(&poll.question)
            .bind(poll.pub_date)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        let mut created = Vec::with_capacity(choices.len());
        for label in choices {
            let id = sqlx::query("INSERT INTO choices (poll_id, choice, votes) VALUES (?, ?, 0)")
                .bind(poll_id)
                .bind(&label)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();
            created.push(Choice {
                id,
                poll_id,
                choice: label,
                votes: 0,
            });
        }

        // 任何錯誤都會在 tx 被 drop 時自動 rollback
        tx.commit().await?;

        Ok((
            Poll {
                id: poll_id,
                question: poll.question,
                pub_date: poll.pub_date,
            },
            created,
        ))
    }

    async fn list_polls(&self) -> Result<Vec<Poll>> {
        let rows = sqlx::query("SELECT id, question, pub_date FROM polls ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(poll_from_row).collect()
    }

    async fn get_poll(&self, id: i64) -> Result<Option<Poll>> {
        let row = sqlx::query("SELECT id, question, pub_date FROM polls WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(poll_from_row).transpose()
    }

    async fn choices_for(&self, poll_id: i64) -> Result<Vec<Choice>> {
        let rows = sqlx::query(
            "SELECT id, poll_id, choice, votes FROM choices WHERE poll_id = ? ORDER BY id",
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(choice_from_row).collect()
    }

    async fn get_choice(&self, id: i64) -> Result<Option<Choice>> {
        let row = sqlx::query("SELECT id, poll_id, choice, votes FROM choices WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(choice_from_row).transpose()
    }

    async fn save_choice(&self, choice: &Choice) -> Result<()> {
        let done = sqlx::query("UPDATE choices SET choice = ?, votes = ? WHERE id = ?")
            .bind(&choice.choice)
            .bind(i64::from(choice.votes))
            .bind(choice.id)
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(PollError::not_found("Choice", choice.id));
        }
        Ok(())
    }

    async fn increment_votes(&self, poll_id: i64, choice_id: i64) -> Result<Choice> {
        let row = sqlx::query(
            "UPDATE choices SET votes = votes + 1
             WHERE id = ? AND poll_id = ? AND votes < ?
             RETURNING id, poll_id, choice, votes",
        )
        .bind(choice_id)
        .bind(poll_id)
        .bind(i64::from(u32::MAX))
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return choice_from_row(&row);
        }

        // 沒有更新任何列：選項不存在、不屬於此投票，或票數已達上限
        match self.get_choice(choice_id).await? {
            Some(choice) if choice.poll_id == poll_id => Err(vote_limit_reached(choice_id)),
            _ => Err(PollError::not_found("Choice", choice_id)),
        }
    }

    async fn delete_poll(&self, id: i64) -> Result<bool> {
        let done = sqlx::query("DELETE FROM polls WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }
}
