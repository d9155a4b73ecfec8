use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::Value;
use std::error::Error;

#[derive(Parser)]
#[command(name = "routes-cli")]
#[command(about = "Management CLI for the Camel routes endpoint", long_about = None)]
struct Cli {
    /// Base URL of the routes endpoint.
    #[arg(short, long, default_value = "http://localhost:8080/camel/routes")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all routes
    List,
    /// Show route summary
    Info { id: String },
    /// Show route summary and statistics
    Detail { id: String },
    /// Start a route
    Start { id: String },
    /// Stop a route
    Stop {
        id: String,
        /// Seconds to wait for in-flight exchanges
        #[arg(long)]
        timeout: Option<u64>,
        /// Whether to abort the stop if the timeout elapses (true or false)
        #[arg(long)]
        abort_after_timeout: Option<bool>,
    },
    /// Suspend a route
    Suspend {
        id: String,
        /// Seconds to wait for in-flight exchanges
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Resume a suspended route
    Resume { id: String },
}

/// `{base}/{id}/{operation}` with the id percent-encoded as one path segment.
fn route_url(base: &Url, id: &str, operation: &str) -> Result<Url, Box<dyn Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| format!("{} cannot be used as a base URL", base))?
        .pop_if_empty()
        .push(id)
        .push(operation);
    Ok(url)
}

fn operation_query(
    timeout: Option<u64>,
    abort_after_timeout: Option<bool>,
) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(timeout) = timeout {
        query.push(("timeout", timeout.to_string()));
    }
    if let Some(abort) = abort_after_timeout {
        query.push(("abortAfterTimeout", abort.to_string()));
    }
    query
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let res = match cli.command {
        Commands::List => client.get(base).send().await?,
        Commands::Info { id } => client.get(route_url(&base, &id, "info")?).send().await?,
        Commands::Detail { id } => client.get(route_url(&base, &id, "detail")?).send().await?,
        Commands::Start { id } => client.post(route_url(&base, &id, "start")?).send().await?,
        Commands::Stop {
            id,
            timeout,
            abort_after_timeout,
        } => {
            client
                .post(route_url(&base, &id, "stop")?)
                .query(&operation_query(timeout, abort_after_timeout))
                .send()
                .await?
        }
        Commands::Suspend { id, timeout } => {
            client
                .post(route_url(&base, &id, "suspend")?)
                .query(&operation_query(timeout, None))
                .send()
                .await?
        }
        Commands::Resume { id } => client.post(route_url(&base, &id, "resume")?).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: routes endpoint returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    if text.is_empty() {
        println!("OK");
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_id_is_one_encoded_segment() {
        let base = Url::parse("http://localhost:8080/camel/routes").unwrap();
        let url = route_url(&base, "my route?#/x", "stop").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/camel/routes/my%20route%3F%23%2Fx/stop"
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn test_trailing_slash_on_base_is_ignored() {
        let base = Url::parse("http://localhost:8080/camel/routes/").unwrap();
        let url = route_url(&base, "orders", "info").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/camel/routes/orders/info");
    }

    #[test]
    fn test_explicit_false_is_sent() {
        assert_eq!(
            operation_query(Some(30), Some(false)),
            vec![
                ("timeout", "30".to_string()),
                ("abortAfterTimeout", "false".to_string()),
            ]
        );
        assert!(operation_query(None, None).is_empty());
    }

    #[test]
    fn test_abort_flag_takes_a_value() {
        let args = ["routes-cli", "stop", "orders", "--abort-after-timeout", "false"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Stop {
                abort_after_timeout, ..
            } => assert_eq!(abort_after_timeout, Some(false)),
            _ => panic!("expected stop"),
        }
    }
}
