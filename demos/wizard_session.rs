//! A scripted wizard session against an in-process server
//!
//! Starts the API on an ephemeral port, walks a wizard through every step
//! (including one blocked attempt to leave step 1), submits the draft and
//! prints the listing.
//!
//! ```sh
//! cargo run --example wizard_session
//! ```

use prestoconfig::prelude::*;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("PrestoConfig wizard session\n");

    // Serve the API with a mailer that keeps messages in memory
    let mailer = RecordingMailer::new();
    let app = ServerBuilder::new()
        .with_store(InMemoryConfigurationStore::new())
        .with_mailer(mailer.clone())
        .build();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    tokio::spawn(async move { axum::serve(listener, app).await });

    let client = HttpSubmissionClient::new(&base_url, Duration::from_secs(10))?;
    let mut wizard = Wizard::new();

    // Step 1 refuses to move without a product
    if !wizard.advance() {
        println!("{} -> {}", wizard.step(), wizard.field_errors());
    }

    let answers: [(&str, FieldValue); 11] = [
        ("product", "patio_cover".into()),
        ("installationType", "attached".into()),
        ("dimensions.width", "300".into()),
        ("dimensions.depth", "400".into()),
        ("color", "gray".into()),
        ("led", "yes".into()),
        ("service", true.into()),
        ("branch", "rajshahi".into()),
        ("name", "Nadia".into()),
        ("email", "nadia@example.com".into()),
        ("phone", "+880 1700 000000".into()),
    ];

    for (name, value) in answers {
        wizard.update_field(name, value)?;

        // Move on once the last field of the current step is filled
        let closes_step = DraftField::from_path(name)
            .and_then(|field| field.step().fields().last().copied())
            .is_some_and(|last| last.path() == name);
        if closes_step && wizard.advance() {
            println!("-> {}", wizard.step());
        }
    }

    println!("\n{}", wizard.review());

    match wizard.submit(&client).await {
        SubmitStatus::Accepted => println!("Submitted: {}", banner_text(&wizard)),
        other => println!("Submission ended as {:?}: {}", other, wizard.field_errors()),
    }

    for email in mailer.sent() {
        println!("\nNotified {} ({})\n{}", email.to, email.subject, email.text);
    }

    let listing: serde_json::Value = reqwest::get(format!("{}/configurations", base_url))
        .await?
        .json()
        .await?;
    println!(
        "\nStored configurations: {}",
        listing["pagination"]["totalConfigs"]
    );

    Ok(())
}

fn banner_text(wizard: &Wizard) -> &str {
    wizard.banner().map(Banner::message).unwrap_or_default()
}
