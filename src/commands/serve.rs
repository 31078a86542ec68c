use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;

/// Host the preview server binds to.
const PREVIEW_HOST: &str = "localhost";

/// Build the router serving static files from `output_dir`.
pub fn router(output_dir: &Path) -> Router {
    let serve_dir = ServeDir::new(output_dir).append_index_html_on_directories(true);
    Router::new().fallback_service(serve_dir)
}

/// Serve `output_dir` on `localhost:<port>` until Ctrl+C.
pub async fn run(output_dir: &Path, port: u16) -> Result<(), anyhow::Error> {
    let app = router(output_dir);

    let listener = tokio::net::TcpListener::bind((PREVIEW_HOST, port)).await?;
    let url = format!("http://{PREVIEW_HOST}:{port}");

    println!("\nServing {} at {}", output_dir.display(), url);
    println!("Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("preview server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
