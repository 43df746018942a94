use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let api_key = std::env::var("API_KEY").ok().filter(|k| !k.is_empty());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!(
        "mock AzuraCast listening on {addr} ({})",
        if api_key.is_some() { "API key required" } else { "no authentication" }
    );
    mock_server::run(listener, api_key.as_deref()).await
}
