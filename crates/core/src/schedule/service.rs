//! Schedule generation.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::calendar::Cadence;
use crate::schedule::description::installment_description;
use crate::schedule::error::ScheduleError;
use crate::schedule::types::{
    EntryEdit, EntryStatus, InstallmentInfo, LedgerEntry, PlannedEntry, RecurrenceInfo,
    SchedulePlan, ScheduleRequest,
};

/// Origin tag for entries created from the finance screens.
pub const FINANCE_ORIGIN: &str = "financeiro";

/// Decimal places kept on an installment share, the scale of the stored
/// money columns.
pub const SHARE_SCALE: u32 = 4;

/// Stateless service that expands schedule requests into entries.
pub struct ScheduleService;

impl ScheduleService {
    /// Expands a request into the entries to insert, in due-date order.
    ///
    /// - `Installments` with `count > 1` emits `count` entries of
    ///   `value / count` truncated to [`SHARE_SCALE`] places, suffixed
    ///   ` (i/count)`. The last entry takes the remainder so the shares add
    ///   up to `value` exactly.
    /// - `Recurring` with `count > 1` emits `count` entries of the full
    ///   value with a `recorrente` descriptor.
    /// - `Monthly`/`Yearly` emit one entry with a `{tipo, dia}` descriptor.
    /// - Anything else, including a count of exactly 1, emits one plain entry.
    ///
    /// # Errors
    ///
    /// Returns a `ScheduleError` when the description is blank, the value is
    /// not positive, a count is zero or a day is outside 1..=31.
    pub fn generate(request: &ScheduleRequest) -> Result<Vec<PlannedEntry>, ScheduleError> {
        let description = normalize_description(&request.description)?;
        if request.value <= Decimal::ZERO {
            return Err(ScheduleError::NonPositiveValue(request.value));
        }

        let entries = match request.plan {
            SchedulePlan::Installments { count: 0, .. } | SchedulePlan::Recurring { count: 0, .. } => {
                return Err(ScheduleError::ZeroCount);
            }
            SchedulePlan::Installments { count, cadence } if count > 1 => {
                Self::installments(request, &description, count, cadence)
            }
            SchedulePlan::Recurring { count, cadence } if count > 1 => {
                Self::recurrences(request, &description, count, cadence)
            }
            SchedulePlan::Monthly { day } => {
                let day = resolve_day(day, request.date)?;
                vec![base_entry(
                    request,
                    description,
                    request.value,
                    request.date,
                    None,
                    Some(RecurrenceInfo::Monthly { day }),
                )]
            }
            SchedulePlan::Yearly { day } => {
                let day = resolve_day(day, request.date)?;
                vec![base_entry(
                    request,
                    description,
                    request.value,
                    request.date,
                    None,
                    Some(RecurrenceInfo::Yearly { day }),
                )]
            }
            SchedulePlan::Single
            | SchedulePlan::Installments { .. }
            | SchedulePlan::Recurring { .. } => vec![base_entry(
                request,
                description,
                request.value,
                request.date,
                None,
                None,
            )],
        };

        Ok(entries)
    }

    fn installments(
        request: &ScheduleRequest,
        description: &str,
        count: u32,
        cadence: Cadence,
    ) -> Vec<PlannedEntry> {
        let share = (request.value / Decimal::from(count))
            .round_dp_with_strategy(SHARE_SCALE, RoundingStrategy::ToZero);
        let last = request.value - share * Decimal::from(count - 1);
        due_dates(request.date, count, cadence)
            .into_iter()
            .zip(1..=count)
            .map(|(date, current)| {
                base_entry(
                    request,
                    installment_description(description, current, count),
                    if current == count { last } else { share },
                    date,
                    Some(InstallmentInfo {
                        current,
                        total: count,
                    }),
                    None,
                )
            })
            .collect()
    }

    fn recurrences(
        request: &ScheduleRequest,
        description: &str,
        count: u32,
        cadence: Cadence,
    ) -> Vec<PlannedEntry> {
        due_dates(request.date, count, cadence)
            .into_iter()
            .zip(1..=count)
            .map(|(date, current)| {
                base_entry(
                    request,
                    description.to_string(),
                    request.value,
                    date,
                    None,
                    Some(RecurrenceInfo::Repeating {
                        cadence: cadence.tag().to_string(),
                        count,
                        current,
                    }),
                )
            })
            .collect()
    }

    /// Applies a manual edit to a stored entry and returns its new state.
    ///
    /// Moving to `Realized` stamps `today` as the realized date; moving back
    /// to `Scheduled` clears it.
    ///
    /// # Errors
    ///
    /// Returns a `ScheduleError` for a blank description or non-positive value.
    pub fn apply_edit(
        entry: &LedgerEntry,
        edit: &EntryEdit,
        today: NaiveDate,
    ) -> Result<PlannedEntry, ScheduleError> {
        let description = normalize_description(&edit.description)?;
        if edit.value <= Decimal::ZERO {
            return Err(ScheduleError::NonPositiveValue(edit.value));
        }

        let realized_date = match edit.status {
            EntryStatus::Realized => Some(today),
            EntryStatus::Scheduled => None,
        };

        Ok(PlannedEntry {
            description,
            value: edit.value,
            kind: edit.kind,
            cost_center_id: edit.cost_center_id,
            scheduled_date: edit.scheduled_date,
            status: edit.status,
            realized_date,
            recurrence: edit.recurrence.clone(),
            ..entry.data.clone()
        })
    }
}

/// Returns `count` due dates starting at `start`, each one cadence after the previous.
#[must_use]
pub fn due_dates(start: NaiveDate, count: u32, cadence: Cadence) -> Vec<NaiveDate> {
    std::iter::successors(Some(start), |date| Some(cadence.next_date(*date)))
        .take(count as usize)
        .collect()
}

fn normalize_description(raw: &str) -> Result<String, ScheduleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::EmptyDescription);
    }
    Ok(trimmed.to_uppercase())
}

fn resolve_day(day: Option<u32>, date: NaiveDate) -> Result<u32, ScheduleError> {
    match day {
        Some(d) if (1..=31).contains(&d) => Ok(d),
        Some(d) => Err(ScheduleError::InvalidDay(d)),
        None => Ok(date.day()),
    }
}

fn base_entry(
    request: &ScheduleRequest,
    description: String,
    value: Decimal,
    date: NaiveDate,
    installment: Option<InstallmentInfo>,
    recurrence: Option<RecurrenceInfo>,
) -> PlannedEntry {
    PlannedEntry {
        user_id: request.user_id,
        description,
        value,
        kind: request.kind,
        scheduled_date: date,
        realized_date: None,
        status: EntryStatus::Scheduled,
        cost_center_id: request.cost_center_id,
        cash_box_id: request.cash_box_id,
        origin: FINANCE_ORIGIN.to_string(),
        installment,
        recurrence,
    }
}
