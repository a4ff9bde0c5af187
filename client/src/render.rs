//! What the page shows, independent of any UI toolkit.

use common::{JobField, JobId, JobRecord, SalaryInput, CATEGORIES};
use std::fmt::Write;

use crate::ops::OpState;

pub const HEADING: &str = "Your Posted Jobs";
pub const LOADING: &str = "Loading...";
pub const NO_JOBS: &str = "You've not posted any jobs or maybe you deleted all of your jobs!";
pub const NO_CATEGORY: &str = "Select Category";

#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Loading,
    /// The viewer was sent elsewhere; nothing is shown.
    Redirected,
    Ready(Vec<CardView>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    Save,
    Cancel,
    Delete,
}

/// One labelled input on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub field: JobField,
    pub label: String,
    pub value: String,
}

impl TextInput {
    fn of(job: &JobRecord, field: JobField) -> Self {
        Self {
            field,
            label: field.label(),
            value: job.display_value(field),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: JobId,
    /// Title, country and city inputs.
    pub short_fields: Vec<TextInput>,
    pub category: String,
    pub salary: SalaryInput,
    pub expired: bool,
    /// Description and location text areas.
    pub long_fields: Vec<TextInput>,
    /// Inputs are enabled only for the card in edit mode.
    pub editable: bool,
    pub actions: Vec<CardAction>,
    pub op: OpState,
}

impl CardView {
    pub fn build(job: &JobRecord, editable: bool, op: OpState) -> Self {
        let actions = if editable {
            vec![CardAction::Save, CardAction::Cancel, CardAction::Delete]
        } else {
            vec![CardAction::Edit, CardAction::Delete]
        };
        Self {
            id: job.id.clone(),
            short_fields: [JobField::Title, JobField::Country, JobField::City]
                .into_iter()
                .map(|f| TextInput::of(job, f))
                .collect(),
            category: job.display_value(JobField::Category),
            salary: job.salary_input(),
            expired: job.is_expired(),
            long_fields: [JobField::Description, JobField::Location]
                .into_iter()
                .map(|f| TextInput::of(job, f))
                .collect(),
            editable,
            actions,
            op,
        }
    }

    pub fn field(&self, field: JobField) -> Option<&str> {
        self.short_fields
            .iter()
            .chain(&self.long_fields)
            .find(|i| i.field == field)
            .map(|i| i.value.as_str())
    }
}

/// `(value, label)` pairs of the category select, empty choice first.
pub fn category_options() -> Vec<(&'static str, &'static str)> {
    std::iter::once(("", NO_CATEGORY))
        .chain(CATEGORIES.iter().map(|c| (*c, *c)))
        .collect()
}

/// Plain-text rendering for terminals.
pub fn render_page(page: &PageView) -> String {
    let mut out = String::new();
    match page {
        PageView::Loading => out.push_str(LOADING),
        PageView::Redirected => {}
        PageView::Ready(cards) => {
            let _ = writeln!(out, "{HEADING}");
            if cards.is_empty() {
                out.push_str(NO_JOBS);
            }
            for card in cards {
                let _ = writeln!(out);
                render_card(&mut out, card);
            }
        }
    }
    out
}

fn render_card(out: &mut String, card: &CardView) {
    let marker = if card.editable { " (editing)" } else { "" };
    let sending = if card.op.is_pending() { " (sending...)" } else { "" };
    let _ = writeln!(out, "[{}]{}{}", card.id, marker, sending);
    for input in &card.short_fields {
        let _ = writeln!(out, "  {} {}", input.label, input.value);
    }
    let category = if card.category.is_empty() {
        NO_CATEGORY
    } else {
        card.category.as_str()
    };
    let _ = writeln!(out, "  Category: {category}");
    if card.editable {
        let labels: Vec<&str> = category_options().into_iter().map(|(_, label)| label).collect();
        let _ = writeln!(out, "    Options: {}", labels.join(" | "));
    }
    match &card.salary {
        SalaryInput::Fixed(value) => {
            let _ = writeln!(out, "  Salary: {value}");
        }
        SalaryInput::Range { from, to } => {
            let _ = writeln!(out, "  Salary: {from} - {to}");
        }
    }
    let _ = writeln!(out, "  Expired: {}", if card.expired { "TRUE" } else { "FALSE" });
    for input in &card.long_fields {
        let _ = writeln!(out, "  {} {}", input.label, input.value);
    }
    let actions: Vec<&str> = card
        .actions
        .iter()
        .map(|a| match a {
            CardAction::Edit => "Edit",
            CardAction::Save => "Save",
            CardAction::Cancel => "Cancel",
            CardAction::Delete => "Delete",
        })
        .collect();
    let _ = writeln!(out, "  [{}]", actions.join(" | "));
}
