//! General Discord commands - ping and help.
//! These commands need no login and never touch the attendance service.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Attendance Desk Help**\n\
        Record daily class and MDM attendance for your assigned class.\n\n\
        **Getting Started**\n\
        • `/login <username> <password>` - Logs in and opens today's form.\n\
        • `/date <YYYY-MM-DD|today>` - Switches the form to another date.\n\n\
        **Entering Counts**\n\
        • `/focus <field>` - Moves the cursor to a field, e.g. `classAttendance-SC-girls`.\n\
        • `/type <digits>` - Types into the focused field. Two digits move to the next field.\n\
        • `/enter <field> [value]` - Sets one field directly; no value blanks it.\n\
        • `/show` - Shows the form and its totals.\n\n\
        **Saving**\n\
        • `/submit` - Saves a new entry, or updates the existing one for that date.\n\
        • `/clear` - Blanks every field without saving.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Counts run from 0 to 99. Larger numbers are capped at 99.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
