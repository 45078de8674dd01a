#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = gemini_proxy_lib::modules::logger::init_logger();

    gemini_proxy_lib::run().await
}
