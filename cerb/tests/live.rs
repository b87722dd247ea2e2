//! Tests against a real Cerb instance.
//!
//! Set `CERB_TEST=on` together with `CERB_BASE_URL`, `CERB_ACCESS_KEY` and
//! `CERB_ACCESS_SECRET` (or in `.env`) to run them.

use std::env;

use anyhow::Result;
use log::{debug, warn};

use cerb::{default_context, Client, ErrorKind, Ticket};

async fn init_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();

    dotenv::from_filename(".env").ok();

    if env::var("CERB_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    Some(
        Client::from_env(default_context())
            .await
            .expect("client must be built from env"),
    )
}

#[tokio::test]
async fn test_list_open_tickets() -> Result<()> {
    let Some(client) = init_client().await else {
        warn!("CERB_TEST is not set, skipped");
        return Ok(());
    };

    let page = client.list_open_tickets(0).await?;
    debug!("got {} tickets, {} remaining", page.records.len(), page.remaining);
    assert!(page.remaining >= 0);
    assert!(page.records.iter().all(|t| t.status == "o"));
    Ok(())
}

#[tokio::test]
async fn test_search_raw() -> Result<()> {
    let Some(client) = init_client().await else {
        warn!("CERB_TEST is not set, skipped");
        return Ok(());
    };

    let results = client
        .search_raw::<Ticket>("ticket", "q=status:[o] page:0 limit:5")
        .await?;
    assert!(results.results.len() <= 5);
    Ok(())
}

#[tokio::test]
async fn test_wrong_secret_is_rejected() -> Result<()> {
    let Some(client) = init_client().await else {
        warn!("CERB_TEST is not set, skipped");
        return Ok(());
    };

    let signer = cerb::Signer::new(
        default_context(),
        cerb::auth::Credential::new(
            client.signer().credential().access_key.clone(),
            "definitely-wrong",
        ),
        cerb::auth::RequestSigner::new(),
    );
    let bad = Client::new(signer, client.base_url())?;

    let err = bad.list_open_tickets(0).await.unwrap_err();
    debug!("wrong secret gives: {err}");
    assert!(matches!(
        err.kind(),
        ErrorKind::Remote | ErrorKind::UnexpectedStatus
    ));
    Ok(())
}
