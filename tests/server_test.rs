use anyhow::Result;
use small_polls::core::admin::PollAdmin;
use small_polls::{web, AppState, MemoryStore, PollStore};
use std::sync::Arc;
use tokio::net::TcpListener;

struct LiveServer {
    base_url: String,
    store: Arc<dyn PollStore>,
    client: reqwest::Client,
}

impl LiveServer {
    async fn start() -> Result<Self> {
        let store: Arc<dyn PollStore> = Arc::new(MemoryStore::new());
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let state = AppState::new(Arc::clone(&store))?;
        tokio::spawn(web::serve(listener, state, std::future::pending()));

        Ok(Self {
            base_url,
            store,
            client: reqwest::Client::new(),
        })
    }

    async fn page(&self, path: &str) -> Result<String> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Submits the vote form and returns the page the redirect lands on.
    async fn vote(&self, path: &str, choice_id: i64) -> Result<String> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("content-type", "application/x-www-form-urlencoded")
            .body(format!("vote={}", choice_id))
            .send()
            .await?
            .error_for_status()?;
        assert_eq!(response.url().path(), path);
        Ok(response.text().await?)
    }
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_voting_on_a_new_poll() -> Result<()> {
    let server = LiveServer::start().await?;
    let admin = PollAdmin::new(server.store.as_ref());
    let tdd = admin
        .create_poll(
            "How awesome is TDD?",
            &labels(&["Very awesome", "Quite awesome", "Moderately awesome"]),
        )
        .await?;
    admin
        .create_poll(
            "Which food do you prefer?",
            &labels(&["Beer", "Pizza", "Banana"]),
        )
        .await?;

    let home = server.page("/").await?;
    assert!(home.contains("<h1>Polls</h1>"));
    assert!(home.contains("How awesome is TDD?"));
    assert!(home.contains("Which food do you prefer?"));

    let poll_path = tdd.poll.url();
    let detail = server.page(&poll_path).await?;
    assert!(detail.contains("<h1>Poll Results</h1>"));
    assert!(detail.contains("<h2>How awesome is TDD?</h2>"));
    assert!(detail.contains("Nobody has voted on this poll yet"));
    assert_eq!(detail.matches("type=\"radio\"").count(), 3);
    assert!(detail.contains("Vote:"));

    let very = tdd.choices[0].id;
    let quite = tdd.choices[1].id;

    let body = server.vote(&poll_path, very).await?;
    assert!(body.contains("100 %: Very awesome"));
    assert!(body.contains("1 vote"));
    assert!(!body.contains("1 votes"));

    let body = server.vote(&poll_path, very).await?;
    assert!(body.contains("100 %: Very awesome"));
    assert!(body.contains("2 votes"));

    let body = server.vote(&poll_path, quite).await?;
    assert!(body.contains("67 %: Very awesome"));
    assert!(body.contains("33 %: Quite awesome"));
    assert!(body.contains("3 votes"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_poll_returns_404() -> Result<()> {
    let server = LiveServer::start().await?;

    let response = server
        .client
        .get(format!("{}/poll/7/", server.base_url))
        .send()
        .await?;

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    Ok(())
}
