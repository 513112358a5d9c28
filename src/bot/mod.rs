//! Bot layer - Discord interface for the attendance form
//!
//! Each Discord user logs in once and then edits a single form session through slash
//! commands. All form decisions are made in [`crate::core`]; this layer only parses
//! arguments, manages sessions and formats replies.

/// Discord command implementations (auth, attendance, general)
pub mod commands;
/// Discord interaction handlers (autocomplete)
pub mod handlers;
/// Per-user form sessions
pub mod sessions;

use crate::{errors::Error, service::HttpAttendanceService};
use poise::serenity_prelude as serenity;
use sessions::SessionStore;
use tracing::{info, instrument};

/// Shared data available to all bot commands.
#[derive(Debug)]
pub struct BotData {
    /// Client for the remote attendance service
    pub service: HttpAttendanceService,
    /// Open form sessions keyed by Discord user ID
    pub sessions: SessionStore,
}

impl BotData {
    /// Creates the shared bot state with no open sessions.
    #[must_use]
    pub fn new(service: HttpAttendanceService) -> Self {
        Self {
            service,
            sessions: SessionStore::default(),
        }
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.send(commands::reply::error_reply(&error)).await {
                tracing::error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Starts the bot and runs until the client stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<(), Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::login(),
                commands::date(),
                commands::focus(),
                commands::type_digits(),
                commands::enter(),
                commands::show(),
                commands::submit(),
                commands::clear(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| tracing::error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| tracing::error!("Client error: {:?}", e))?;
    Ok(())
}
