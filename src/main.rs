use clap::Parser;
use small_polls::core::admin::PollAdmin;
use small_polls::domain::tally;
use small_polls::utils::error::ErrorSeverity;
use small_polls::utils::logger;
use small_polls::{open_store, web, AppConfig, AppState, Cli, Command, PollError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 先以命令列參數初始化日誌，設定檔錯誤也需要被記錄
    let config = match cli.load_config() {
        Ok(config) => {
            logger::init_from_config(&config.logging);
            config
        }
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            exit_with(e);
        }
    };

    tracing::debug!("Config: {:?}", config);

    if let Err(e) = run(cli.command, config).await {
        exit_with(e);
    }
}

async fn run(command: Command, config: AppConfig) -> Result<(), PollError> {
    let store = open_store(config.database_url()?, config.database.max_connections).await?;

    match command {
        Command::Serve { .. } => {
            let address = config.bind_address();
            tracing::info!("Binding to {}", address);
            let listener = tokio::net::TcpListener::bind(&address).await?;
            let state = AppState::new(store)?;
            web::serve(listener, state, web::shutdown_signal()).await?;
        }
        Command::CreatePoll { question, choices } => {
            let created = PollAdmin::new(store.as_ref())
                .create_poll(&question, &choices)
                .await?;
            println!("✅ Created poll {}: {}", created.poll.id, created.poll);
            for choice in &created.choices {
                println!("   [{}] {}", choice.id, choice);
            }
        }
        Command::ListPolls => {
            let polls = PollAdmin::new(store.as_ref()).list_polls().await?;
            if polls.is_empty() {
                println!("No polls yet. Create one with `small-polls create-poll`.");
            }
            for overview in polls {
                let total = overview.total_votes();
                println!(
                    "[{}] {} ({}: {}) - {}",
                    overview.poll.id,
                    overview.poll,
                    small_polls::Poll::PUB_DATE_LABEL,
                    overview.poll.pub_date.format("%Y-%m-%d %H:%M"),
                    tally::votes_label(total)
                );
                for choice in &overview.choices {
                    let share = tally::display_percentage(tally::percentage(choice.votes, total));
                    println!("   [{}] {:>3} %: {}", choice.id, share, choice);
                }
            }
        }
        Command::DeletePoll { id } => {
            PollAdmin::new(store.as_ref()).delete_poll(id).await?;
            println!("🗑️  Deleted poll {}", id);
        }
    }

    Ok(())
}

fn exit_with(e: PollError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 1,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
