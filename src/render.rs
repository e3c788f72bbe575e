//! The renderer turns an ordered list of records into card view-models and
//! writes them to a display surface, replacing whatever was there before.

use crate::models::GameRecord;

/// Everything a surface needs to draw one game card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub image_ref: String,
    pub name: String,
    pub description: String,
    pub pledged_label: String,
    pub backers_label: String,
    pub funded: bool,
}

impl CardView {
    pub fn from_record(record: &GameRecord) -> Self {
        Self {
            image_ref: record.image_ref().to_string(),
            name: record.name().to_string(),
            description: record.description().to_string(),
            pledged_label: format_currency(record.pledged()),
            backers_label: group_thousands(record.backers()),
            funded: record.is_funded(),
        }
    }
}

/// A container that shows one card per rendered record.
pub trait DisplaySurface {
    /// Drop every card currently shown.
    fn clear(&mut self);
    /// Add a card after the ones already shown.
    fn append(&mut self, card: CardView);
}

/// Replace the surface contents with one card per record, in order.
pub fn render<'a, S, I>(surface: &mut S, records: I) -> usize
where
    S: DisplaySurface + ?Sized,
    I: IntoIterator<Item = &'a GameRecord>,
{
    surface.clear();
    let mut shown = 0;
    for record in records {
        surface.append(CardView::from_record(record));
        shown += 1;
    }
    shown
}

/// Whole-dollar amount with comma grouping, e.g. `$1,234,567`.
pub fn format_currency(amount: f64) -> String {
    let dollars = amount.max(0.0).round() as u64;
    format!("${}", group_thousands(dollars))
}

pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
