use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::debug;
use pplxprobe::report;
use pplxprobe::{Error, PerplexityClient, ProbeConfig};

#[derive(Parser)]
#[command(name = "pplxprobe")]
#[command(about = "Send test questions to the Perplexity API and show what comes back")]
#[command(version)]
struct Cli
{   /// API key; prompted for when absent
    #[arg(long, env = "PPLX_API_KEY", hide_env_values = true)]
    api_key: Option<String>
  , /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>
  , /// Baseline question
    #[arg(short, long, default_value = pplxprobe::BASELINE_MESSAGE)]
    message: String
  , /// Question that needs live information, asked after the baseline passes
    #[arg(long, default_value = pplxprobe::LIVE_MESSAGE)]
    live_message: String
  , /// Override the endpoint URL
    #[arg(long)]
    endpoint: Option<String>
  , /// Override the model
    #[arg(long)]
    model: Option<String>
  , /// Override the request timeout
    #[arg(long)]
    timeout_secs: Option<u64>
}

#[tokio::main]
async fn main()
{   env_logger::init();
    if let Err(e) = run().await
    {   eprintln!("Error: {}", e);
    }
}

async fn run() -> Result<(), Error>
{   let cli = Cli::parse();
    let config = build_config(&cli)?;

    println!("Perplexity API Test Script");
    println!("{}", report::SEPARATOR);

    let api_key = match &cli.api_key
    {   Some(key) => key.clone()
      , None => prompt_api_key()?
    };

    let client = match PerplexityClient::new(&api_key, config)
    {   Ok(client) => client
      , Err(Error::InvalidApiKey) => {
          println!("{}", Error::InvalidApiKey);
          return Ok(());
        }
      , Err(e) => return Err(e)
    };

    let masked_key = client.masked_key();
    let endpoint = client.config().endpoint.clone();
    let (first, second) = client
      .probe_pair(&cli.message, &cli.live_message, |index, probe| {
        let title = match index
        {   1 => "Test 1: Baseline question"
          , _ => "Test 2: Live information question"
        };
        println!("\n{}", title);
        match report::render_report(&masked_key, &endpoint, probe)
        {   Ok(rendered) => println!("{}", rendered)
          , Err(e) => eprintln!("Error: {}", e)
        }
      })
      .await?;

    match second
    {   None => {
          println!("\nAPI test failed: {}", first.outcome);
          println!("\n{}", report::render_common_issues());
        }
      , Some(second) if second.outcome.is_success() => {
          println!("\nBoth tests passed. The Perplexity API is working.");
        }
      , Some(second) => {
          println!(
            "\nBaseline test passed but live test failed: {}",
            second.outcome
          );
        }
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<ProbeConfig, Error>
{   let mut config = match &cli.config
    {   Some(path) => ProbeConfig::load(path)?
      , None => ProbeConfig::default()
    };
    if let Some(endpoint) = &cli.endpoint
    {   config.endpoint = endpoint.clone();
    }
    if let Some(model) = &cli.model
    {   config.model = model.clone();
    }
    if let Some(timeout_secs) = cli.timeout_secs
    {   config.timeout_secs = timeout_secs;
    }
    config.validate()?;
    debug!("Using config: {:?}", config);
    Ok(config)
}

fn prompt_api_key() -> Result<String, Error>
{   print!(
      "Enter your Perplexity API key ({}...): ",
      pplxprobe::API_KEY_PREFIX
    );
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
