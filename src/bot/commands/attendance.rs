//! Attendance form commands - date selection, field entry, submit and clear.
//!
//! Every command works on the caller's own session, opened by `/login`. Replies are
//! private and always end with the current state of the form.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::reply, handlers::autocomplete},
        core::{fields::FieldId, session::Notice, workflow},
        errors::{Error, Result},
    };

    /// Selects the date to record and loads anything already saved for it.
    #[poise::command(slash_command, prefix_command)]
    pub async fn date(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Date as YYYY-MM-DD, or 'today'"] date: String,
    ) -> Result<()> {
        let date = reply::parse_date(&date)?;
        let session = reply::user_session(ctx).await?;
        ctx.defer_ephemeral().await?;

        let outcome = workflow::select_date(&ctx.data().service, &session, date).await?;
        let notice = outcome
            .notice()
            .or_else(|| Some(Notice::info("A newer date was selected meanwhile.")));
        reply::send_form(ctx, &session, notice).await
    }

    /// Moves the cursor to a field; `/type` then fills it.
    #[poise::command(slash_command, prefix_command)]
    pub async fn focus(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Field to edit"]
        #[autocomplete = "autocomplete::autocomplete_field_name"]
        field: String,
    ) -> Result<()> {
        let field: FieldId = field.parse()?;
        let session = reply::user_session(ctx).await?;
        session.lock().await.focus_field(field);
        reply::send_form(ctx, &session, None).await
    }

    /// Types digits into the focused field, one keystroke at a time.
    ///
    /// Once a field holds two digits the cursor moves to the next field, so a whole
    /// form can be entered as a sequence of `/type` commands.
    #[poise::command(slash_command, prefix_command, rename = "type")]
    pub async fn type_digits(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Digits to type, e.g. 75"] digits: String,
    ) -> Result<()> {
        let session = reply::user_session(ctx).await?;
        session.lock().await.type_keys(&digits)?;
        reply::send_form(ctx, &session, None).await
    }

    /// Sets a field to a value; leave the value out to blank the field.
    #[poise::command(slash_command, prefix_command)]
    pub async fn enter(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Field to set"]
        #[autocomplete = "autocomplete::autocomplete_field_name"]
        field: String,
        #[description = "Count between 0 and 99 (empty to clear)"] value: Option<String>,
    ) -> Result<()> {
        let field: FieldId = field.parse()?;
        let session = reply::user_session(ctx).await?;
        session
            .lock()
            .await
            .input(field, value.as_deref().unwrap_or(""))?;
        reply::send_form(ctx, &session, None).await
    }

    /// Shows your form with current totals.
    #[poise::command(slash_command, prefix_command)]
    pub async fn show(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let session = reply::user_session(ctx).await?;
        reply::send_form(ctx, &session, None).await
    }

    /// Saves the form. Creates the day's entry, or updates it if one exists.
    #[poise::command(slash_command, prefix_command)]
    pub async fn submit(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let session = reply::user_session(ctx).await?;
        ctx.defer_ephemeral().await?;

        let outcome = workflow::submit(&ctx.data().service, &session).await?;
        reply::send_form(ctx, &session, Some(outcome.notice())).await
    }

    /// Blanks every field without saving anything.
    #[poise::command(slash_command, prefix_command)]
    pub async fn clear(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let session = reply::user_session(ctx).await?;
        let notice = session.lock().await.clear()?;
        reply::send_form(ctx, &session, Some(notice)).await
    }
}

pub use inner::*;
