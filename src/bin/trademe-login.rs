//! Interactive OAuth login for the Trade Me API.
//!
//! Prompts for consumer credentials and an environment name, runs the
//! PIN-entry authorization flow, and prints the resulting token pair. The
//! credentials are also saved to the default store location.

use trademe_rs::auth::{LoginFlow, TerminalInteraction, UserInteraction};
use trademe_rs::models::DEFAULT_ENVIRONMENT;
use trademe_rs::{Environment, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let terminal = TerminalInteraction;
    let consumer_key = terminal.prompt("Consumer key")?;
    let consumer_secret = terminal.prompt("Consumer secret")?;
    let name = terminal.prompt(&format!("Environment (default: {DEFAULT_ENVIRONMENT})"))?;
    let environment = if name.is_empty() {
        Environment::default()
    } else {
        Environment::resolve(&name)?
    };

    let credentials = LoginFlow::new(consumer_key, consumer_secret)
        .environment(environment)
        .prefer_local_callback(false)
        .run()
        .await?;

    println!("access_token: {}", credentials.access_token);
    println!("access_token_secret: {}", credentials.access_token_secret);
    Ok(())
}
