//! Text rendering of the attendance form.
//!
//! Produces plain strings for a front-end to display. Empty counts render as blank
//! cells; totals are recomputed on every render.

use crate::{
    core::{
        fields::FieldId,
        record::{AttendanceKind, Category, Gender},
        session::{FormSession, Notice, NoticeLevel},
    },
    errors::Result,
};
use std::fmt::Write;

const CELL_WIDTH: usize = 6;

fn cell(session: &FormSession, field: FieldId) -> String {
    let value = session.count(field).to_string();
    let marked = if session.focus() == field {
        format!("{value}*")
    } else {
        value
    };
    format!("{marked:>width$}", width = CELL_WIDTH)
}

fn category_row(session: &FormSession, kind: AttendanceKind, category: Category) -> String {
    let girls = cell(session, FieldId::new(kind, category, Gender::Girls));
    let boys = cell(session, FieldId::new(kind, category, Gender::Boys));
    format!("{:<8}{girls}{boys}", category.key())
}

/// One line per category row, class block first. Used for display and in tests.
#[must_use]
pub fn field_rows(session: &FormSession) -> Vec<String> {
    AttendanceKind::ALL
        .iter()
        .flat_map(|kind| {
            Category::ALL
                .iter()
                .map(move |category| category_row(session, *kind, *category))
        })
        .collect()
}

/// Renders the whole form: header, both blocks with totals, and the submit action.
pub fn render_form(session: &FormSession) -> Result<String> {
    let mut out = String::new();
    writeln!(&mut out, "**Welcome, {}!**", session.teacher().name)?;
    writeln!(
        &mut out,
        "Class (Locked): **{}** | Date: **{}**",
        session.class_name(),
        session.date().format("%Y-%m-%d")
    )?;

    let totals = session.totals();
    writeln!(&mut out, "```")?;
    for kind in AttendanceKind::ALL {
        writeln!(&mut out, "{}", kind.label())?;
        writeln!(
            &mut out,
            "{:<8}{:>width$}{:>width$}",
            "Category",
            "Girls",
            "Boys",
            width = CELL_WIDTH
        )?;
        for category in Category::ALL {
            writeln!(&mut out, "{}", category_row(session, kind, category))?;
        }
        let t = totals.get(kind);
        writeln!(
            &mut out,
            "Total Girls: {} | Total Boys: {} | Grand Total: {}",
            t.total_girls, t.total_boys, t.grand_total
        )?;
        writeln!(&mut out)?;
    }
    writeln!(&mut out, "```")?;

    if session.is_busy() {
        write!(&mut out, "⏳ Working... ({})", session.activity())?;
    } else {
        writeln!(&mut out, "Next field: `{}`", session.focus())?;
        write!(&mut out, "Action: **{}**", session.submit_label())?;
    }
    Ok(out)
}

/// Formats a notification with an indicator for its level.
#[must_use]
pub fn format_notice(notice: &Notice) -> String {
    let icon = match notice.level {
        NoticeLevel::Success => "✅",
        NoticeLevel::Error => "❌",
        NoticeLevel::Info => "ℹ️",
    };
    format!("{icon} {}", notice.message)
}
