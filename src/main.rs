use redemption_server::frameworks::server;

#[tokio::main]
async fn main() {
    // Delegate to the server framework entry point.
    if let Err(e) = server::run_with_config().await {
        tracing::error!(error = %e, "redemption server stopped");
        std::process::exit(1);
    }
}
