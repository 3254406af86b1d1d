use alignment_chart::error::ServiceError;

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    // Distroless images have no curl; the binary probes itself.
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match alignment_chart::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1)
            }
        }
    }

    alignment_chart::app::run().await
}
