use clap::{Parser, Subcommand};
use rvd_clients::{EventCatalogClient, RegistrationClient};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

#[derive(Parser)]
#[command(name = "rvd")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Serve,
    Openapi,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Serve => {
            let db_path =
                std::env::var("RVD_DB_PATH").unwrap_or_else(|_| ".rvd/reviews.db".to_string());
            if let Some(parent) = Path::new(&db_path).parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let port = std::env::var("RVD_PORT")
                .ok()
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(8086);
            let event_service_url = std::env::var("RVD_EVENT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8082".to_string());
            let registration_service_url = std::env::var("RVD_REGISTRATION_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8084".to_string());
            let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
            let state = rvd_serve::AppState {
                db_path,
                events: EventCatalogClient::new(event_service_url),
                registrations: RegistrationClient::new(registration_service_url),
            };
            log::info!("listening on {addr}");
            if let Err(err) = rvd_serve::serve(state, addr).await {
                eprintln!("serve error: {err}");
            }
        }
        Command::Openapi => {
            let spec = rvd_serve::openapi::generate_spec();
            println!("{}", spec);
        }
    }
}
