//! Yearly statistics report types and the pure steps of building one.
//!
//! The store owns the queries; the pieces here decide which enriched rows
//! survive the author-name filter and how per-type sums are formed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::entry::BudgetType;

// ─── Query ───────────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::BudgetStore::year_stats`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearStatsQuery {
  pub year:   i32,
  /// Page size applied to the listing, before the name filter.
  pub limit:  usize,
  pub offset: usize,
  /// Case-insensitive substring matched against the linked author's name.
  /// `None` or a blank string disables filtering.
  pub name:   Option<String>,
}

// ─── Enriched rows ───────────────────────────────────────────────────────────

/// Author details joined onto a report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAuthor {
  pub full_name:  String,
  pub created_at: DateTime<Utc>,
}

/// A budget entry enriched with its author, as listed in a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsItem {
  pub year:        i32,
  pub month:       u32,
  pub amount:      i32,
  pub budget_type: BudgetType,
  pub author:      Option<ItemAuthor>,
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// The yearly report.
///
/// `total` counts every entry of the year and ignores the name filter, while
/// `total_by_type` and `items` honour it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearStats {
  pub total:         u64,
  /// Only types that occur in the filtered set have a key. Sums are 64-bit.
  pub total_by_type: BTreeMap<BudgetType, i64>,
  /// One page of the year ordered by month ascending, amount descending.
  pub items:         Vec<StatsItem>,
}

// ─── Name filter ─────────────────────────────────────────────────────────────

/// A non-blank, case-insensitive author-name filter.
///
/// Matching compares the name and the filter char by char, so case mappings
/// that change with position (such as Greek final sigma) still match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
  needle: Vec<char>,
}

impl NameFilter {
  /// Returns `None` for an absent, empty or whitespace-only filter.
  pub fn new(name: Option<&str>) -> Option<Self> {
    let name = name?;
    if name.trim().is_empty() {
      return None;
    }
    Some(Self { needle: name.chars().collect() })
  }

  /// Rows without an author never match.
  pub fn matches(&self, item: &StatsItem) -> bool {
    item
      .author
      .as_ref()
      .is_some_and(|a| self.is_in(&a.full_name))
  }

  fn is_in(&self, haystack: &str) -> bool {
    let haystack: Vec<char> = haystack.chars().collect();
    haystack.windows(self.needle.len()).any(|window| {
      window
        .iter()
        .zip(&self.needle)
        .all(|(&h, &n)| chars_eq_ignore_case(h, n))
    })
  }
}

/// Equal as-is, after upper-casing, or after upper- then lower-casing.
fn chars_eq_ignore_case(a: char, b: char) -> bool {
  if a == b {
    return true;
  }
  let (ua, ub) = (upper_char(a), upper_char(b));
  ua == ub || lower_char(ua) == lower_char(ub)
}

// Characters whose mapping expands to several chars map to themselves.
fn upper_char(c: char) -> char { single_char(c.to_uppercase()).unwrap_or(c) }

fn lower_char(c: char) -> char { single_char(c.to_lowercase()).unwrap_or(c) }

fn single_char(mut chars: impl Iterator<Item = char>) -> Option<char> {
  let first = chars.next()?;
  chars.next().is_none().then_some(first)
}

/// Drop the rows rejected by `filter`; a `None` filter keeps everything.
pub fn apply_name_filter(
  items: Vec<StatsItem>,
  filter: Option<&NameFilter>,
) -> Vec<StatsItem> {
  match filter {
    Some(f) => items.into_iter().filter(|i| f.matches(i)).collect(),
    None => items,
  }
}

/// Sum `amount` per type over `items`.
pub fn sum_by_type(items: &[StatsItem]) -> BTreeMap<BudgetType, i64> {
  let mut sums = BTreeMap::new();
  for item in items {
    *sums.entry(item.budget_type).or_insert(0) += i64::from(item.amount);
  }
  sums
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  fn item(month: u32, amount: i32, t: BudgetType, author: Option<&str>) -> StatsItem {
    StatsItem {
      year: 2020,
      month,
      amount,
      budget_type: t,
      author: author.map(|name| ItemAuthor {
        full_name:  name.to_owned(),
        created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
      }),
    }
  }

  #[test]
  fn blank_filters_are_disabled() {
    assert!(NameFilter::new(None).is_none());
    assert!(NameFilter::new(Some("")).is_none());
    assert!(NameFilter::new(Some("  \t ")).is_none());
    assert!(NameFilter::new(Some("a")).is_some());
  }

  #[test]
  fn filter_is_case_insensitive_substring() {
    let f = NameFilter::new(Some("jAnE")).unwrap();
    assert!(f.matches(&item(1, 1, BudgetType::Income, Some("Jane Doe"))));
    assert!(f.matches(&item(1, 1, BudgetType::Income, Some("Mary-JANE"))));
    assert!(!f.matches(&item(1, 1, BudgetType::Income, Some("John Doe"))));
  }

  #[test]
  fn filter_matches_greek_sigma_in_any_position() {
    let name = Some("ΟΔΥΣΣΕΥΣ");
    for needle in ["σ", "ς", "Σ", "υσ", "οδυσσευς"] {
      let f = NameFilter::new(Some(needle)).unwrap();
      assert!(
        f.matches(&item(1, 1, BudgetType::Income, name)),
        "{needle:?} should match"
      );
    }
  }

  #[test]
  fn filter_longer_than_name_never_matches() {
    let f = NameFilter::new(Some("Jane Doe Smith")).unwrap();
    assert!(!f.matches(&item(1, 1, BudgetType::Income, Some("Jane Doe"))));
  }

  #[test]
  fn filter_rejects_rows_without_author() {
    let f = NameFilter::new(Some("doe")).unwrap();
    assert!(!f.matches(&item(1, 1, BudgetType::Income, None)));
  }

  #[test]
  fn filter_keeps_surrounding_whitespace_in_needle() {
    let f = NameFilter::new(Some(" doe")).unwrap();
    assert!(f.matches(&item(1, 1, BudgetType::Income, Some("Jane Doe"))));
    assert!(!f.matches(&item(1, 1, BudgetType::Income, Some("Doe"))));
  }

  #[test]
  fn apply_without_filter_keeps_everything() {
    let items = vec![
      item(1, 1, BudgetType::Income, None),
      item(2, 2, BudgetType::Expense, Some("Jane")),
    ];
    assert_eq!(apply_name_filter(items.clone(), None), items);
  }

  #[test]
  fn sums_only_present_types() {
    let items = vec![
      item(1, 100, BudgetType::Income, None),
      item(1, 50, BudgetType::Expense, Some("Jane Doe")),
      item(2, 10, BudgetType::Income, None),
    ];
    let sums = sum_by_type(&items);
    assert_eq!(sums.len(), 2);
    assert_eq!(sums[&BudgetType::Income], 110);
    assert_eq!(sums[&BudgetType::Expense], 50);
    assert!(!sums.contains_key(&BudgetType::Commission));
  }

  #[test]
  fn sums_of_maximum_amounts_do_not_overflow() {
    let items = vec![
      item(1, i32::MAX, BudgetType::Commission, None),
      item(2, i32::MAX, BudgetType::Commission, None),
      item(3, i32::MAX, BudgetType::Commission, None),
    ];
    let sums = sum_by_type(&items);
    assert_eq!(sums[&BudgetType::Commission], 3 * i64::from(i32::MAX));
  }

  #[test]
  fn sums_of_nothing_are_empty() {
    assert!(sum_by_type(&[]).is_empty());
  }
}
