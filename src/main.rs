use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use robokademi::cli::create_superadmin;
use robokademi::router::init_router;
use robokademi::state::init_app_state;

#[derive(Parser)]
#[command(name = "robokademi", about = "Robokademi back-office API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a super admin account with the full permission catalog.
    CreateSuperadmin {
        first_name: String,
        last_name: String,
        email: String,
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs extractor rejections under `axum::rejection` at TRACE
                format!(
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Some(Command::CreateSuperadmin {
        first_name,
        last_name,
        email,
        password,
    }) = cli.command
    {
        let state = init_app_state().await?;
        let user = create_superadmin(&state.db, &first_name, &last_name, &email, &password)
            .await
            .map_err(|e| e.error)?;
        println!("Super admin created: {} ({})", user.user.email, user.user.id);
        return Ok(());
    }

    let state = init_app_state().await?;
    let app = init_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("server listening on http://localhost:{port}");
    tracing::info!("Swagger UI at http://localhost:{port}/swagger-ui");
    tracing::info!("Scalar UI at http://localhost:{port}/scalar");
    axum::serve(listener, app).await?;

    Ok(())
}
