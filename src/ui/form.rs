use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Debt, NewDebt};

/// Transient buffers behind the three input fields. The buffers live here and
/// nowhere else; a successful commit clears them and everything rebuilds from
/// store state.
#[derive(Default, Clone)]
pub(crate) struct DebtForm {
    pub(crate) who: String,
    pub(crate) cost: String,
    pub(crate) why: String,
    pub(crate) active: DebtField,
    pub(crate) error: Option<String>,
}

/// Fields available within the commit form.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum DebtField {
    Who,
    Cost,
    Why,
}

impl Default for DebtField {
    fn default() -> Self {
        DebtField::Who
    }
}

impl DebtForm {
    /// Cycle focus forward across the three fields.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            DebtField::Who => DebtField::Cost,
            DebtField::Cost => DebtField::Why,
            DebtField::Why => DebtField::Who,
        };
    }

    /// Cycle focus backward.
    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            DebtField::Who => DebtField::Why,
            DebtField::Cost => DebtField::Who,
            DebtField::Why => DebtField::Cost,
        };
    }

    /// Append a character to the active field. Control characters are
    /// rejected; everything else is accepted verbatim, including amount text
    /// that will never parse. Typing also clears a stale validation message.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.error = None;
        match self.active {
            DebtField::Who => self.who.push(ch),
            DebtField::Cost => self.cost.push(ch),
            DebtField::Why => self.why.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            DebtField::Who => {
                self.who.pop();
            }
            DebtField::Cost => {
                self.cost.pop();
            }
            DebtField::Why => {
                self.why.pop();
            }
        }
    }

    /// Validate the commit policy and return a record ready for persistence.
    /// The name and the amount must be non-blank; the reason may be empty.
    /// Trimming applies only to the emptiness checks: all three buffers are
    /// persisted exactly as typed.
    pub(crate) fn parse_inputs(&self) -> Result<NewDebt> {
        if self.who.trim().is_empty() {
            return Err(anyhow!("Name is required."));
        }
        if self.cost.trim().is_empty() {
            return Err(anyhow!("Amount is required."));
        }
        Ok(NewDebt {
            who: self.who.clone(),
            cost: self.cost.clone(),
            why: self.why.clone(),
        })
    }

    /// Reset every buffer after a successful commit. Focus returns to the
    /// name field so the next entry starts from the top.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: DebtField) -> Line<'static> {
        let (value, is_active) = match field {
            DebtField::Who => (&self.who, self.active == DebtField::Who),
            DebtField::Cost => (&self.cost, self.active == DebtField::Cost),
            DebtField::Why => (&self.why, self.active == DebtField::Why),
        };

        let placeholder = match field {
            DebtField::Who | DebtField::Cost => "<required>",
            DebtField::Why => "<optional>",
        };

        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: DebtField) -> usize {
        match field {
            DebtField::Who => self.who.chars().count(),
            DebtField::Cost => self.cost.chars().count(),
            DebtField::Why => self.why.chars().count(),
        }
    }
}

/// State for confirming the removal of a single entry.
#[derive(Clone)]
pub(crate) struct ConfirmDelete {
    pub(crate) id: i64,
    pub(crate) who: String,
    pub(crate) cost: String,
}

impl ConfirmDelete {
    /// Build the confirmation state from the entry being considered.
    pub(crate) fn from(debt: &Debt) -> Self {
        Self {
            id: debt.id,
            who: debt.who.clone(),
            cost: debt.cost.clone(),
        }
    }
}
