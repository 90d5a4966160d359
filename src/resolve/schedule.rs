//! Due and defer date derivation.
//!
//! # Precedence
//! - `due`: explicit date, else the recurrence schedule, else none.
//! - `defer`: explicit date (unless already past), else `due - lead_time`
//!   clamped to today, else `last_done + last_for`, else none.
//!
//! Spans that push a date past the calendar limits are reported against
//! their field; a lead time reaching before the limit clamps to today.

use chrono::{Days, NaiveDate};

use crate::context::PlanContext;
use crate::error::ParseError;
use crate::models::{Recurrence, Resolved};

/// A recurrence span moved a date out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpanOverflow {
    pub field: &'static str,
    pub source: ParseError,
}

fn overflow(field: &'static str) -> impl FnOnce(ParseError) -> SpanOverflow {
    move |source| SpanOverflow { field, source }
}

/// Resolves the due date.
///
/// For weekday recurrences:
/// - completed today → due a week from today
/// - last completed more than a week ago → due a week after that (overdue)
/// - otherwise → the next occurrence of the weekday, today included
pub(crate) fn resolve_due(
    explicit: Option<NaiveDate>,
    recurrence: &Recurrence,
    ctx: &PlanContext,
) -> Result<Option<Resolved<NaiveDate>>, SpanOverflow> {
    if let Some(due) = explicit {
        return Ok(Some(Resolved::explicit(due)));
    }
    if !recurrence.has_recurring_due() {
        return Ok(None);
    }

    let Some(last_done) = recurrence.last_done else {
        return Ok(Some(Resolved::derived(ctx.date())));
    };

    if let Some(frequency) = &recurrence.frequency {
        let due = frequency.after(last_done).map_err(overflow("frequency"))?;
        return Ok(Some(Resolved::derived(due)));
    }

    let Some(weekday) = recurrence.day_of_week else {
        return Ok(None);
    };
    let due = if last_done == ctx.date() {
        ctx.offset(7)
    } else if (ctx.date() - last_done).num_days() > 7 {
        // More than a week before today, so a week later is still in range.
        last_done
            .checked_add_days(Days::new(7))
            .unwrap_or(NaiveDate::MAX)
    } else {
        ctx.next_weekday(weekday)
    };
    Ok(Some(Resolved::derived(due)))
}

/// Resolves the defer date from an already-resolved due date.
pub(crate) fn resolve_defer(
    explicit: Option<NaiveDate>,
    due: Option<NaiveDate>,
    recurrence: &Recurrence,
    ctx: &PlanContext,
) -> Result<Option<Resolved<NaiveDate>>, SpanOverflow> {
    // Past defers carry no information.
    if let Some(defer) = explicit.filter(|d| *d >= ctx.date()) {
        return Ok(Some(Resolved::explicit(defer)));
    }

    if let (Some(lead_time), Some(due)) = (&recurrence.lead_time, due) {
        let defer = lead_time
            .before(due)
            .unwrap_or(NaiveDate::MIN)
            .max(ctx.date());
        return Ok(Some(Resolved::derived(defer)));
    }

    let Some(last_for) = &recurrence.last_for else {
        return Ok(None);
    };
    let defer = match recurrence.last_done {
        Some(last_done) => last_for.after(last_done).map_err(overflow("last_for"))?,
        None => ctx.date(),
    };
    Ok(Some(Resolved::derived(defer)))
}
