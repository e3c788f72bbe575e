use crate::render::{CardView, DisplaySurface};

/// Terminal-side display surface: the cards from the latest render plus the
/// user's cursor into them.
#[derive(Default)]
pub(crate) struct CardBoard {
    pub(crate) cards: Vec<CardView>,
    pub(crate) selected: usize,
}

impl CardBoard {
    pub(crate) fn current_card(&self) -> Option<&CardView> {
        self.cards.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.cards.is_empty() {
            return;
        }
        let len = self.cards.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.cards.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.cards.is_empty() {
            self.selected = self.cards.len() - 1;
        }
    }

    /// Pull the cursor back inside the card list after a render shrank it.
    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.cards.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.cards.len() {
            self.selected = self.cards.len() - 1;
        }
    }
}

impl DisplaySurface for CardBoard {
    fn clear(&mut self) {
        self.cards.clear();
    }

    fn append(&mut self, card: CardView) {
        self.cards.push(card);
    }
}
