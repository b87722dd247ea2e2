use anyhow::Result;
use cerb::auth::{DefaultCredentialProvider, RequestSigner};
use cerb::{default_context, Client, Signer, Ticket};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Env, tokio fs and reqwest wired into one context
    let ctx = default_context();

    // Resolve the credential once: CERB_ACCESS_KEY/CERB_ACCESS_SECRET, then creds.json
    let signer = Signer::from_provider(ctx, DefaultCredentialProvider::new(), RequestSigner::new())
        .await?;

    let base_url = std::env::var("CERB_BASE_URL")?;
    let client = Client::new(signer, &base_url)?;

    // First page only, then walk the rest
    let page = client.list_open_tickets(0).await?;
    println!(
        "{} open tickets on page 0, {} remaining",
        page.records.len(),
        page.remaining
    );

    let all: Vec<Ticket> = client
        .search_all("ticket", "status:[o]", 100, Some("initial_message_sender_"))
        .await?;
    for t in &all {
        println!(
            "{:>10} {} <{}>",
            t.mask,
            t.subject,
            t.email.as_deref().unwrap_or("unknown")
        );
    }

    Ok(())
}
