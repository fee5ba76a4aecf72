use std::time::Duration;

use bazaar::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Fake backend
// ---------------------------------------------------------------------------

/// Accepts one vendor account. Stands in for the marketplace's login API.
struct DemoBackend;

impl Authenticator for DemoBackend {
    async fn authenticate(&self, credentials: &Credentials) -> Result<SessionRecord, SessionError> {
        // Network latency.
        tokio::time::sleep(Duration::from_millis(20)).await;

        let reply = if credentials.email == "priya@example.com" && credentials.password == "demo" {
            json!({
                "status": 1,
                "message": "Login successful",
                "data": {
                    "vendor_id": 17,
                    "vendor_name": "Priya's Flower Studio",
                    "vendor_email": credentials.email.as_str(),
                    "vendor_phone": "555-0117",
                    "vendor_unique_id": "FLW-0017",
                },
            })
        } else {
            json!({ "status": 0, "message": "Invalid email or password" })
        };

        serde_json::from_value::<LoginResponse>(reply)
            .map_err(|e| SessionError::AuthFailed(e.to_string()))?
            .into_payload()
    }
}

// ---------------------------------------------------------------------------
// Walk-through
// ---------------------------------------------------------------------------

fn show(step: &str, nav: &Navigation, client: &BazaarClient) {
    let view = client.nav().render();
    let links: Vec<&str> = view.links.iter().map(|l| l.label).collect();
    tracing::info!(
        step,
        location = %nav.location(),
        authenticated = client.manager().is_authenticated(),
        "walk-through step"
    );
    println!(
        "{step:<28} → {:<24} nav: {:?} [{}]",
        nav.location().to_string(),
        links,
        view.button.label()
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // BAZAAR_DATA_DIR keeps the session on disk across runs.
    let mut builder = BazaarClient::builder();
    if let Some(dir) = std::env::var_os("BAZAAR_DATA_DIR") {
        builder = builder.durable_dir(dir);
    }
    let mut client = builder.build()?;
    let flow = LoginFlow::new(DemoBackend);

    let nav = client.navigate("/VendorProfile")?;
    show("visit /VendorProfile", &nav, &client);

    match client
        .submit_login(&flow, &Credentials::vendor("priya@example.com", "wrong"))
        .await
    {
        Ok(nav) => show("login (wrong password)", &nav, &client),
        Err(e) => {
            tracing::warn!(error = %e, "login rejected");
            let reason = e.auth_failure().unwrap_or("error");
            println!("{:<28} → {}", "login (wrong password)", reason);
        }
    }

    let nav = client
        .submit_login(&flow, &Credentials::vendor("priya@example.com", "demo"))
        .await?;
    show("login", &nav, &client);

    if let Some(session) = client.manager().get_session() {
        let now = client.manager().now();
        let left = ExpiryPolicy::remaining(&session, now).unwrap_or_default();
        println!("{:<28}   expires in {}h", "", left.as_secs() / 3600);
    }

    let mut client = client.reload();
    let nav = client.navigate("/Services")?;
    show("reload, visit /Services", &nav, &client);

    let nav = client.logout()?;
    show("logout", &nav, &client);

    let nav = client.navigate("/payment")?;
    show("visit /payment", &nav, &client);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_backend_accepts_demo_vendor() {
        let record = DemoBackend
            .authenticate(&Credentials::vendor("priya@example.com", "demo"))
            .await
            .unwrap();
        assert_eq!(record.field("vendor_id"), Some(&json!(17)));
        assert_eq!(record.expiry, None);
    }

    #[tokio::test]
    async fn test_demo_backend_rejects_with_message() {
        let err = DemoBackend
            .authenticate(&Credentials::vendor("priya@example.com", "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::AuthFailed(ref m) if m == "Invalid email or password"));
    }

    #[tokio::test]
    async fn test_walkthrough_lands_on_origin_after_login() {
        let mut client = BazaarClient::builder().build().unwrap();
        let flow = LoginFlow::new(DemoBackend);

        client.navigate("/VendorProfile").unwrap();
        let nav = client
            .submit_login(&flow, &Credentials::vendor("priya@example.com", "demo"))
            .await
            .unwrap();

        assert_eq!(nav.location(), &Location::new("/VendorProfile"));
    }
}
