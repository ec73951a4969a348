//! List navigation helpers for menus and the permission toggles.

use ratatui::widgets::ListState;

/// Extension trait for `ListState` with the wrapping moves the screens use.
pub trait ListStateExt {
    /// Moving up from the first item goes to the last.
    fn select_previous_wrap(&mut self, total_items: usize);

    /// Moving down from the last item goes to the first.
    fn select_next_wrap(&mut self, total_items: usize);

    fn select_first_item(&mut self, total_items: usize);

    fn select_last_item(&mut self, total_items: usize);
}

impl ListStateExt for ListState {
    fn select_previous_wrap(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0).min(total_items - 1);
        let new_index = if current == 0 {
            total_items - 1
        } else {
            current - 1
        };
        self.select(Some(new_index));
    }

    fn select_next_wrap(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0);
        let new_index = if current >= total_items - 1 {
            0
        } else {
            current + 1
        };
        self.select(Some(new_index));
    }

    fn select_first_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.select(Some(0));
        }
    }

    fn select_last_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.select(Some(total_items - 1));
        }
    }
}
