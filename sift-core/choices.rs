//! The candidate collection: parsing, scoring passes, and ranking.

use crate::score::score;

/// One selectable candidate.
///
/// `text` and `description` never change during a session; `score` is
/// rewritten by every filter pass. A score of zero means the candidate does
/// not match the current query: it stays in the collection but is neither
/// displayed nor selectable.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
  pub text:        String,
  pub description: String,
  pub score:       f32,
}

impl Choice {
  pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      text:        text.into(),
      description: description.into(),
      score:       0.0,
    }
  }

  /// Parse one input line: text up to the first tab, description after it.
  /// A line without a tab is all text.
  pub fn parse(line: &str) -> Self {
    match line.split_once('\t') {
      Some((text, description)) => Self::new(text, description),
      None => Self::new(line, ""),
    }
  }
}

/// Score every choice in place against `query`.
pub fn score_all(choices: &mut [Choice], query: &str) {
  for choice in choices.iter_mut() {
    choice.score = score(&choice.text, query);
  }
}

/// Rank choices in place: best score first, ties broken by ascending text.
///
/// The sort is stable, so ranking an already ranked collection is a no-op
/// and equal-score, equal-text choices keep their relative order.
pub fn rank(choices: &mut [Choice]) {
  choices.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.text.cmp(&b.text)));
}

/// Number of choices matching the current query.
pub fn match_count(choices: &[Choice]) -> usize {
  choices.iter().filter(|choice| choice.score > 0.0).count()
}

#[cfg(test)]
mod test {
  use super::*;

  fn collection(texts: &[&str]) -> Vec<Choice> {
    texts.iter().map(|text| Choice::new(*text, "")).collect()
  }

  fn ranked_texts(choices: &[Choice]) -> Vec<&str> {
    choices.iter().map(|choice| choice.text.as_str()).collect()
  }

  #[test]
  fn parse_splits_on_first_tab() {
    let choice = Choice::parse("main.rs\tsrc/main.rs");
    assert_eq!(choice.text, "main.rs");
    assert_eq!(choice.description, "src/main.rs");

    let choice = Choice::parse("a\tb\tc");
    assert_eq!(choice.text, "a");
    assert_eq!(choice.description, "b\tc");
  }

  #[test]
  fn parse_without_tab_has_empty_description() {
    let choice = Choice::parse("main.rs");
    assert_eq!(choice.text, "main.rs");
    assert_eq!(choice.description, "");
  }

  #[test]
  fn rank_orders_by_score_then_text() {
    let mut choices = collection(&["snapple", "maple", "apple"]);
    score_all(&mut choices, "ap");
    rank(&mut choices);
    assert_eq!(ranked_texts(&choices), ["apple", "maple", "snapple"]);
  }

  #[test]
  fn tie_break_ignores_insertion_order() {
    let mut forward = collection(&["apple", "maple"]);
    let mut backward = collection(&["maple", "apple"]);
    for choices in [&mut forward, &mut backward] {
      score_all(choices, "ap");
      rank(choices);
    }
    assert_eq!(ranked_texts(&forward), ranked_texts(&backward));
    assert_eq!(ranked_texts(&forward), ["apple", "maple"]);
  }

  #[test]
  fn empty_query_yields_alphabetical_order() {
    let mut choices = collection(&["pear", "apple", "banana"]);
    score_all(&mut choices, "");
    rank(&mut choices);
    assert!(choices.iter().all(|choice| choice.score == 1.0));
    assert_eq!(ranked_texts(&choices), ["apple", "banana", "pear"]);
  }

  #[test]
  fn non_matching_choices_sink_below_matches() {
    let mut choices = collection(&["zebra", "apple"]);
    score_all(&mut choices, "ap");
    rank(&mut choices);
    assert_eq!(ranked_texts(&choices), ["apple", "zebra"]);
    assert_eq!(choices[1].score, 0.0);
    assert_eq!(match_count(&choices), 1);
  }

  #[test]
  fn rank_is_idempotent() {
    let mut choices = collection(&["snapple", "maple", "apple", "zebra"]);
    score_all(&mut choices, "ap");
    rank(&mut choices);
    let once = choices.clone();
    rank(&mut choices);
    assert_eq!(choices, once);
  }
}
