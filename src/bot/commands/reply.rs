//! Reply helpers shared by the form commands.

use crate::{
    bot::{Context, sessions::SharedSession},
    core::{render, session::Notice},
    errors::{Error, Result},
};
use chrono::NaiveDate;

/// A reply visible only to the invoking user.
#[must_use]
pub fn private_reply(text: String) -> poise::CreateReply {
    poise::CreateReply::default().content(text).ephemeral(true)
}

/// A private reply reporting a failed command.
#[must_use]
pub fn error_reply(error: &Error) -> poise::CreateReply {
    private_reply(format!("❌ {error}"))
}

/// Sends text visible only to the invoking user.
pub async fn send_private(ctx: Context<'_>, text: String) -> Result<()> {
    ctx.send(private_reply(text)).await?;
    Ok(())
}

/// Sends the rendered form, preceded by a notification when there is one.
pub async fn send_form(
    ctx: Context<'_>,
    session: &SharedSession,
    notice: Option<Notice>,
) -> Result<()> {
    let body = {
        let s = session.lock().await;
        render::render_form(&s)?
    };
    let text = match notice {
        Some(notice) => format!("{}\n\n{body}", render::format_notice(&notice)),
        None => body,
    };
    send_private(ctx, text).await
}

/// The caller's session, if they have logged in.
pub async fn user_session(ctx: Context<'_>) -> Result<SharedSession> {
    let user_id = ctx.author().id.to_string();
    ctx.data().sessions.get(&user_id).await
}

/// Today's date on the bot host's clock.
///
/// Local rather than UTC, so a form opened early in the morning east of UTC shows
/// the school day and not the previous one.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parses a `YYYY-MM-DD` date argument; `today` selects [`today`].
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let text = input.trim();
    if text.eq_ignore_ascii_case("today") {
        return Ok(today());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_parse_date_accepts_iso_dates() {
        assert_eq!(parse_date("2024-03-01").unwrap(), date(2024, 3, 1));
        assert_eq!(parse_date(" 2024-12-31 ").unwrap(), date(2024, 12, 31));
    }

    #[test]
    fn test_parse_date_accepts_today() {
        assert_eq!(parse_date("Today").unwrap(), today());
        assert_eq!(today(), chrono::Local::now().date_naive());
    }

    #[test]
    fn test_error_reply_is_private() {
        let reply = error_reply(&Error::NotLoggedIn);
        assert_eq!(reply.ephemeral, Some(true));
        assert_eq!(
            reply.content.as_deref(),
            Some("❌ Not logged in. Use /login first.")
        );
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        for bad in ["01/03/2024", "2024-02-30", "yesterday", ""] {
            assert!(matches!(parse_date(bad), Err(Error::InvalidDate { .. })));
        }
    }
}
