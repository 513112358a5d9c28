//! Login command - authenticates a teacher and opens their form for today.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::reply},
        core::{session::FormSession, workflow},
        errors::{Error, Result},
    };

    /// Logs in with your teacher account and opens today's attendance form.
    ///
    /// Credentials are checked against the attendance service. On success the form for
    /// your assigned class is loaded for today's date, replacing any form you had open.
    /// Slash-only so the password never appears in a channel message.
    #[poise::command(slash_command)]
    pub async fn login(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Username, e.g. teacher6a"] username: String,
        #[description = "Password"] password: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let data = ctx.data();

        let teacher = match workflow::login(&data.service, &username, &password).await {
            Ok(teacher) => teacher,
            Err(e) => {
                ctx.send(reply::error_reply(&e)).await?;
                return Ok(());
            }
        };

        let today = reply::today();
        let user_id = ctx.author().id.to_string();
        let session = data
            .sessions
            .open(&user_id, FormSession::new(teacher, today))
            .await;

        let outcome = workflow::select_date(&data.service, &session, today).await?;
        reply::send_form(ctx, &session, outcome.notice()).await
    }
}

pub use inner::*;
