//! RideGuide terminal front end
//!
//! Reads one chat line per stdin line. `/restart` starts over, `/quit` exits.

use ride_guide::config::RideGuideConfig;
use ride_guide::fares::FareGenerator;
use ride_guide::runtime::{spawn_conversation, UiEvent};
use ride_guide::state_machine::ConvContext;
use ride_guide::transcript::{Author, Message, Transcript};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with the chat on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ride_guide=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = RideGuideConfig::from_env()?;
    let fares = match config.seed {
        Some(seed) => FareGenerator::seeded(seed, config.peak_windows.clone()),
        None => FareGenerator::new(config.peak_windows.clone()),
    };

    let conv_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conv_id = %conv_id, seed = ?config.seed, "Starting RideGuide");

    let booking = |ride_id: &str, booking_url: &str| {
        tracing::info!(ride_id, "Opening booking link");
        println!("🔗 Continue your booking at {booking_url}");
    };

    let handle = spawn_conversation(
        ConvContext::new(conv_id, config.pacing),
        fares,
        booking,
        Transcript::new(),
    )
    .await;

    // Subscribe before printing the backlog so nothing is missed
    let mut events = handle.subscribe();
    for message in handle.messages().await {
        print_message(&message);
    }

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(UiEvent::Message { message }) => print_message(&message),
                Ok(UiEvent::Reset { messages }) => {
                    println!("\n--- new conversation ---");
                    messages.iter().for_each(print_message);
                }
                Ok(UiEvent::InputRejected { reason }) => println!("   ({reason})"),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Renderer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/restart" => handle.restart().await?,
            _ => handle.submit(line).await?,
        }
    }

    tracing::info!("Stdin closed, shutting down");
    Ok(())
}

fn print_message(message: &Message) {
    match message.author {
        Author::Bot => println!("🤖 {}", message.text),
        // Echo is already on the terminal
        Author::User => {}
    }
}
