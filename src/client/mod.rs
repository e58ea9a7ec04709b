//! HTTP API client.
//!
//! The interactive views of the original application as subcommands: a
//! registration view, a login that stores session tokens, and a booking
//! view that fetches the catalog and submits requests with the bearer
//! token attached.

pub mod session;

use std::time::Duration;

use anyhow::{Context, bail};
use reqwest::StatusCode;

use crate::api::dto::{BookingResponse, CategoryResponse, LoginResponse, RegisterResponse};
use crate::cli::{ClientArgs, ClientCommand};
use session::{Session, SessionStore};

/// Shared HTTP client with connection pooling and sane timeouts.
fn http_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .use_rustls_tls()
        .build()
        .context("Failed to build HTTP client")
}

/// Extracts the server's error message from a non-success response.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body: Option<serde_json::Value> = response.json().await.ok();
    body.as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Server returned {}", status))
}

/// Dispatches one client view against the configured server.
pub async fn run(args: &ClientArgs) -> anyhow::Result<()> {
    let client = http_client()?;
    let store = SessionStore::new(
        args.session_file
            .clone()
            .unwrap_or_else(SessionStore::default_path),
    );
    let base = args.server_url.trim_end_matches('/').to_string();

    match &args.view {
        ClientCommand::Register { username, password } => {
            let response = client
                .post(format!("{}/api/users/register", base))
                .json(&serde_json::json!({ "username": username, "password": password }))
                .send()
                .await
                .context("Registration request failed")?;

            if !response.status().is_success() {
                bail!("Registration failed: {}", error_message(response).await);
            }

            let body: RegisterResponse = response.json().await?;
            println!("{}", body.message);
            println!("Log in with: fixly client login -u {} -p <password>", body.user.username);
        }

        ClientCommand::Login { username, password } => {
            let response = client
                .post(format!("{}/api/users/login", base))
                .json(&serde_json::json!({ "username": username, "password": password }))
                .send()
                .await
                .context("Login request failed")?;

            if !response.status().is_success() {
                bail!("Login failed: {}", error_message(response).await);
            }

            let body: LoginResponse = response.json().await?;
            store.save(&Session {
                username: Some(body.user.username.clone()),
                access_token: Some(body.access_token),
                refresh_token: Some(body.refresh_token),
            })?;
            println!("Logged in as {}", body.user.username);
        }

        ClientCommand::Logout => {
            store.clear()?;
            println!("Session cleared");
        }

        ClientCommand::Categories => {
            let response = client
                .get(format!("{}/api/services", base))
                .send()
                .await
                .context("Category request failed")?;

            if !response.status().is_success() {
                bail!("Listing categories failed: {}", error_message(response).await);
            }

            let categories: Vec<CategoryResponse> = response.json().await?;
            if categories.is_empty() {
                println!("No service categories available");
            }
            for category in categories {
                println!("{:>4}  {}", category.id, category.name);
            }
        }

        ClientCommand::Book {
            category_id,
            description,
        } => {
            let session = require_login(&store)?;
            let response = client
                .post(format!("{}/api/bookService", base))
                .bearer_auth(session.access_token.as_deref().unwrap_or_default())
                .json(&serde_json::json!({
                    "description": description,
                    "categoryId": category_id,
                }))
                .send()
                .await
                .context("Booking request failed")?;

            if response.status() == StatusCode::UNAUTHORIZED {
                bail!("Session expired; run `fixly client login` again");
            }
            if !response.status().is_success() {
                bail!("Booking failed: {}", error_message(response).await);
            }

            let booking: BookingResponse = response.json().await?;
            println!(
                "Booked #{} in category {} at {}: {}",
                booking.id, booking.category_id, booking.requested_at, booking.description
            );
        }

        ClientCommand::Bookings => {
            let session = require_login(&store)?;
            let response = client
                .get(format!("{}/api/bookings", base))
                .bearer_auth(session.access_token.as_deref().unwrap_or_default())
                .send()
                .await
                .context("Bookings request failed")?;

            if response.status() == StatusCode::UNAUTHORIZED {
                bail!("Session expired; run `fixly client login` again");
            }
            if !response.status().is_success() {
                bail!("Listing bookings failed: {}", error_message(response).await);
            }

            let bookings: Vec<BookingResponse> = response.json().await?;
            if bookings.is_empty() {
                println!("No bookings yet");
            }
            for booking in bookings {
                let flag = if booking.completed { "done" } else { "open" };
                println!(
                    "{:>4}  [{}] category {} at {}: {}",
                    booking.id, flag, booking.category_id, booking.requested_at, booking.description
                );
            }
        }
    }

    Ok(())
}

fn require_login(store: &SessionStore) -> anyhow::Result<Session> {
    let session = store.load()?;
    if !session.is_logged_in() {
        bail!("Not logged in; run `fixly client login -u <username> -p <password>` first");
    }
    Ok(session)
}
