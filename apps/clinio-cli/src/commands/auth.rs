//! Session commands.

use anyhow::Result;
use clinio_sdk::ClinioClient;
use colored::Colorize;

pub async fn login(client: &ClinioClient, email: &str, password: &str, format: &str) -> Result<()> {
    let response = client.login(email, password).await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&response.user)?),
        _ => {
            let who = response
                .user
                .get("email")
                .and_then(|value| value.as_str())
                .unwrap_or(email);
            println!("{} signed in as {}", "OK".green().bold(), who);
        }
    }
    Ok(())
}

pub async fn logout(client: &ClinioClient) -> Result<()> {
    client.logout().await;
    println!("{} signed out", "OK".green().bold());
    Ok(())
}
