//! The selection session state machine.
//!
//! A [`Picker`] owns the candidate collection and the query buffer. Every
//! mutating edit re-filters: all candidates are re-scored, the collection is
//! re-ranked, the visible count is recomputed and the selection snaps back
//! to the top. Selection and plain cursor movement never re-filter.

use crate::{
  choices::{
    self,
    Choice,
  },
  query::QueryBuffer,
};

pub struct Picker {
  choices:     Vec<Choice>,
  query:       QueryBuffer,
  /// Index into the visible (matching, ranked) prefix of `choices`.
  selected:    usize,
  /// Matching candidates actually on screen: `min(matching, max_visible)`.
  visible:     usize,
  /// Candidates matching the current query, before the row cap.
  matching:    usize,
  /// Row budget supplied by the caller (terminal rows minus the query line).
  max_visible: usize,
}

impl Picker {
  /// Build a picker over `choices`. No filter pass has run yet: callers set
  /// the row budget and then the initial query (possibly empty), which
  /// performs the first pass.
  pub fn new(choices: Vec<Choice>) -> Self {
    Self {
      choices,
      query: QueryBuffer::new(),
      selected: 0,
      visible: 0,
      matching: 0,
      max_visible: 0,
    }
  }

  pub fn query(&self) -> &str {
    self.query.as_str()
  }

  pub fn cursor(&self) -> usize {
    self.query.cursor()
  }

  pub fn selected(&self) -> usize {
    self.selected
  }

  pub fn visible_count(&self) -> usize {
    self.visible
  }

  /// The ranked matching candidates currently on screen.
  pub fn visible_choices(&self) -> &[Choice] {
    &self.choices[..self.visible]
  }

  /// Update the row budget. The visible window and the selection are
  /// re-clamped immediately; the selection is not reset, only re-filters
  /// do that.
  pub fn set_max_visible(&mut self, max_visible: usize) {
    self.max_visible = max_visible;
    self.visible = self.matching.min(self.max_visible);
    self.selected = self.selected.min(self.visible.saturating_sub(1));
  }

  /// Replace the query wholesale, cursor at the end.
  pub fn set_query(&mut self, text: &str) {
    self.query.set(text);
    self.refilter();
  }

  /// Insert a printable character at the cursor.
  pub fn insert_char(&mut self, c: char) {
    let before = self.query.len();
    self.query.insert(c);
    if self.query.len() != before {
      self.refilter();
    }
  }

  pub fn delete_backward(&mut self) {
    if self.query.delete_backward() {
      self.refilter();
    }
  }

  pub fn delete_forward(&mut self) {
    if self.query.delete_forward() {
      self.refilter();
    }
  }

  pub fn delete_to_start(&mut self) {
    self.query.delete_to_start();
    self.refilter();
  }

  pub fn delete_to_end(&mut self) {
    self.query.delete_to_end();
    self.refilter();
  }

  pub fn delete_word_backward(&mut self) {
    if self.query.delete_word_backward() {
      self.refilter();
    }
  }

  pub fn move_cursor_left(&mut self) {
    self.query.move_left();
  }

  pub fn move_cursor_right(&mut self) {
    self.query.move_right();
  }

  pub fn move_cursor_home(&mut self) {
    self.query.move_home();
  }

  pub fn move_cursor_end(&mut self) {
    self.query.move_end();
  }

  pub fn move_selection_up(&mut self) {
    if self.selected > 0 {
      self.selected -= 1;
    }
  }

  pub fn move_selection_down(&mut self) {
    if self.selected + 1 < self.visible {
      self.selected += 1;
    }
  }

  /// The candidate the selection rests on, if anything is visible.
  /// Confirming with an empty result list is inert: the session keeps
  /// editing.
  pub fn confirm(&self) -> Option<&Choice> {
    if self.visible == 0 {
      return None;
    }
    Some(&self.choices[self.selected])
  }

  fn refilter(&mut self) {
    choices::score_all(&mut self.choices, self.query.as_str());
    choices::rank(&mut self.choices);
    self.matching = choices::match_count(&self.choices);
    self.visible = self.matching.min(self.max_visible);
    self.selected = 0;
    log::debug!(
      "filter {:?}: {} of {} match, {} visible",
      self.query.as_str(),
      self.matching,
      self.choices.len(),
      self.visible
    );
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn picker(texts: &[&str], rows: usize, query: &str) -> Picker {
    let choices = texts.iter().map(|text| Choice::new(*text, "")).collect();
    let mut picker = Picker::new(choices);
    picker.set_max_visible(rows);
    picker.set_query(query);
    picker
  }

  fn visible_texts(picker: &Picker) -> Vec<&str> {
    picker
      .visible_choices()
      .iter()
      .map(|choice| choice.text.as_str())
      .collect()
  }

  #[test]
  fn filtering_ranks_and_resets_selection() {
    let mut picker = picker(&["snapple", "maple", "apple"], 10, "");
    picker.move_selection_down();
    picker.set_query("ap");
    assert_eq!(visible_texts(&picker), ["apple", "maple", "snapple"]);
    assert_eq!(picker.selected(), 0);
  }

  #[test]
  fn row_budget_caps_visible_choices() {
    let picker = picker(&["snapple", "maple", "apple"], 2, "ap");
    assert_eq!(picker.visible_count(), 2);
    assert_eq!(visible_texts(&picker), ["apple", "maple"]);
  }

  #[test]
  fn selection_clamps_to_visible_range() {
    let mut picker = picker(&["snapple", "maple", "apple"], 10, "ap");
    picker.move_selection_up();
    assert_eq!(picker.selected(), 0);
    for _ in 0..10 {
      picker.move_selection_down();
    }
    assert_eq!(picker.selected(), 2);
  }

  #[test]
  fn confirm_returns_selected_choice() {
    let mut picker = picker(&["snapple", "maple", "apple"], 10, "ap");
    picker.move_selection_down();
    let choice = picker.confirm().unwrap();
    assert_eq!(choice.text, "maple");
  }

  #[test]
  fn confirm_is_inert_without_matches() {
    let picker = picker(&["apple"], 10, "zzz");
    assert_eq!(picker.visible_count(), 0);
    assert!(picker.confirm().is_none());
  }

  #[test]
  fn confirm_is_inert_on_empty_collection() {
    let picker = picker(&[], 10, "");
    assert!(picker.confirm().is_none());
  }

  #[test]
  fn set_query_is_idempotent() {
    let mut picker = picker(&["snapple", "maple", "apple"], 10, "ap");
    let once = visible_texts(&picker)
      .into_iter()
      .map(String::from)
      .collect::<Vec<_>>();
    picker.set_query("ap");
    assert_eq!(visible_texts(&picker), once);
    assert_eq!(picker.selected(), 0);
  }

  #[test]
  fn boundary_noop_deletes_keep_the_selection() {
    let mut picker = picker(&["snapple", "maple", "apple"], 10, "ap");
    picker.move_selection_down();
    picker.move_cursor_home();
    // Nothing to delete before the cursor, so no re-filter runs and the
    // selection stays put.
    picker.delete_backward();
    picker.delete_word_backward();
    assert_eq!(picker.selected(), 1);
  }

  #[test]
  fn growing_query_narrows_then_backspace_restores() {
    let mut picker = picker(&["snapple", "maple", "apple"], 10, "");
    for c in "apl".chars() {
      picker.insert_char(c);
    }
    assert_eq!(visible_texts(&picker), ["apple", "maple", "snapple"]);
    picker.insert_char('x');
    assert_eq!(picker.visible_count(), 0);
    picker.delete_backward();
    assert_eq!(visible_texts(&picker), ["apple", "maple", "snapple"]);
  }

  #[test]
  fn shrinking_row_budget_reclamps_selection() {
    let mut picker = picker(&["snapple", "maple", "apple"], 10, "ap");
    picker.move_selection_down();
    picker.move_selection_down();
    picker.set_max_visible(2);
    assert_eq!(picker.visible_count(), 2);
    assert_eq!(picker.selected(), 1);
  }
}
