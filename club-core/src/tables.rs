use club_types::{FinanceEntry, InboxMessage, SquadPlayer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SquadColumn {
    Name,
    Position,
    Age,
    CurrentAbility,
    PotentialAbility,
    Value,
    Wage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Query parameters for the squad grid. All knobs are optional and
/// compose; the defaults show everyone sorted by ability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SquadQuery {
    pub name_filter: Option<String>,
    pub position_group: Option<String>,
    pub sort_by: SquadColumn,
    pub direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
}

impl Default for SquadQuery {
    fn default() -> Self {
        Self {
            name_filter: None,
            position_group: None,
            sort_by: SquadColumn::CurrentAbility,
            direction: SortDirection::Descending,
            page: 1,
            page_size: 25,
        }
    }
}

/// One page of a derived table. Holds copies of the matching rows so the
/// source dataset is never touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableView<T> {
    pub rows: Vec<T>,
    pub total_matching: usize,
    pub page: usize,
    pub page_count: usize,
}

fn compare(a: &SquadPlayer, b: &SquadPlayer, column: SquadColumn) -> std::cmp::Ordering {
    match column {
        SquadColumn::Name => a.name.cmp(&b.name),
        SquadColumn::Position => a.position.cmp(&b.position),
        SquadColumn::Age => a.age.cmp(&b.age),
        SquadColumn::CurrentAbility => a.current_ability.cmp(&b.current_ability),
        SquadColumn::PotentialAbility => a.potential_ability.cmp(&b.potential_ability),
        SquadColumn::Value => a.value.cmp(&b.value),
        SquadColumn::Wage => a.wage.cmp(&b.wage),
    }
}

/// Derives a filtered, sorted, paginated view over the squad. Pure: the
/// input slice is read-only and every call recomputes from scratch.
pub fn squad_view(players: &[SquadPlayer], query: &SquadQuery) -> TableView<SquadPlayer> {
    let name_needle = query
        .name_filter
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<SquadPlayer> = players
        .iter()
        .filter(|p| match &name_needle {
            Some(needle) => p.name.to_lowercase().contains(needle),
            None => true,
        })
        .filter(|p| match &query.position_group {
            Some(group) => &p.position_group == group,
            None => true,
        })
        .cloned()
        .collect();

    rows.sort_by(|a, b| {
        let ordering = compare(a, b, query.sort_by);
        match query.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    let total_matching = rows.len();
    let page_size = query.page_size.max(1);
    let page_count = total_matching.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, page_count);
    let start = (page - 1) * page_size;
    let rows = rows
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    TableView {
        rows,
        total_matching,
        page,
        page_count,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinanceKind {
    Income,
    Expenditure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceBreakdown {
    pub kind: FinanceKind,
    pub entries: Vec<FinanceEntry>,
    pub total: i64,
}

/// Snapshot of the club's ledger for one side of the books.
pub fn finance_breakdown(kind: FinanceKind) -> FinanceBreakdown {
    let entries = match kind {
        FinanceKind::Income => crate::datasets::income_entries(),
        FinanceKind::Expenditure => crate::datasets::expenditure_entries(),
    };
    let total = entries.iter().map(|e| e.amount).sum();
    FinanceBreakdown { kind, entries, total }
}

/// Query parameters for the inbox list. The search needle matches sender,
/// subject, or preview.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InboxQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxView {
    pub messages: Vec<InboxMessage>,
    pub unread_count: usize,
}

/// Derives the visible inbox list. Pure like [`squad_view`]; the unread
/// count is computed over the filtered messages, not the full mailbox.
pub fn inbox_view(messages: &[InboxMessage], query: &InboxQuery) -> InboxView {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_lowercase);

    let messages: Vec<InboxMessage> = messages
        .iter()
        .filter(|m| match &needle {
            Some(needle) => {
                m.subject.to_lowercase().contains(needle)
                    || m.from.to_lowercase().contains(needle)
                    || m.preview.to_lowercase().contains(needle)
            }
            None => true,
        })
        .cloned()
        .collect();

    let unread_count = messages.iter().filter(|m| !m.is_read).count();
    InboxView {
        messages,
        unread_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::{inbox_messages, squad_players};

    #[test]
    fn test_default_query_returns_full_squad() {
        let squad = squad_players();
        let view = squad_view(&squad, &SquadQuery::default());
        assert_eq!(view.total_matching, squad.len());
        assert_eq!(view.rows.len(), squad.len());
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_position_group_filter_leaves_source_untouched() {
        let squad = squad_players();
        let before = squad.clone();

        let query = SquadQuery {
            position_group: Some("Defender".to_string()),
            ..SquadQuery::default()
        };
        let view = squad_view(&squad, &query);

        assert_eq!(view.rows.len(), 3);
        assert!(view.rows.iter().all(|p| p.position_group == "Defender"));
        assert_eq!(squad, before);
        assert_eq!(squad.len(), 11);
    }

    #[test]
    fn test_name_filter_is_case_insensitive_substring() {
        let squad = squad_players();
        let query = SquadQuery {
            name_filter: Some("mArTí".to_string()),
            ..SquadQuery::default()
        };
        let view = squad_view(&squad, &query);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].name, "Emiliano Martínez");
    }

    #[test]
    fn test_blank_name_filter_matches_everyone() {
        let squad = squad_players();
        let query = SquadQuery {
            name_filter: Some("   ".to_string()),
            ..SquadQuery::default()
        };
        assert_eq!(squad_view(&squad, &query).total_matching, squad.len());
    }

    #[test]
    fn test_sort_by_age_ascending() {
        let squad = squad_players();
        let query = SquadQuery {
            sort_by: SquadColumn::Age,
            direction: SortDirection::Ascending,
            ..SquadQuery::default()
        };
        let view = squad_view(&squad, &query);
        let ages: Vec<u8> = view.rows.iter().map(|p| p.age).collect();
        let mut sorted = ages.clone();
        sorted.sort_unstable();
        assert_eq!(ages, sorted);
    }

    #[test]
    fn test_sort_by_value_descending() {
        let squad = squad_players();
        let query = SquadQuery {
            sort_by: SquadColumn::Value,
            direction: SortDirection::Descending,
            ..SquadQuery::default()
        };
        let view = squad_view(&squad, &query);
        for pair in view.rows.windows(2) {
            assert!(pair[0].value >= pair[1].value);
        }
    }

    #[test]
    fn test_pagination_splits_and_clamps() {
        let squad = squad_players();
        let query = SquadQuery {
            page_size: 4,
            ..SquadQuery::default()
        };
        let first = squad_view(&squad, &query);
        assert_eq!(first.rows.len(), 4);
        assert_eq!(first.page_count, 3);

        let last = squad_view(
            &squad,
            &SquadQuery {
                page: 3,
                page_size: 4,
                ..SquadQuery::default()
            },
        );
        assert_eq!(last.rows.len(), 3);

        // An out-of-range page clamps to the last page rather than
        // returning an empty view.
        let clamped = squad_view(
            &squad,
            &SquadQuery {
                page: 99,
                page_size: 4,
                ..SquadQuery::default()
            },
        );
        assert_eq!(clamped.page, 3);
        assert_eq!(clamped.rows, last.rows);
    }

    #[test]
    fn test_filters_compose() {
        let squad = squad_players();
        let query = SquadQuery {
            name_filter: Some("o".to_string()),
            position_group: Some("Forward".to_string()),
            ..SquadQuery::default()
        };
        let view = squad_view(&squad, &query);
        assert!(view
            .rows
            .iter()
            .all(|p| p.position_group == "Forward" && p.name.to_lowercase().contains('o')));
        assert!(view.total_matching < squad.len());
    }

    #[test]
    fn test_finance_totals() {
        let income = finance_breakdown(FinanceKind::Income);
        assert_eq!(income.entries.len(), 8);
        assert_eq!(income.total, income.entries.iter().map(|e| e.amount).sum());

        let spend = finance_breakdown(FinanceKind::Expenditure);
        assert_eq!(spend.entries.len(), 8);
        assert!(spend.total > 0);
    }

    #[test]
    fn test_inbox_default_query_shows_all_with_unread_count() {
        let mailbox = inbox_messages();
        let view = inbox_view(&mailbox, &InboxQuery::default());
        assert_eq!(view.messages.len(), mailbox.len());
        assert_eq!(view.unread_count, 2);
    }

    #[test]
    fn test_inbox_search_matches_sender_subject_and_preview() {
        let mailbox = inbox_messages();
        let before = mailbox.clone();

        let view = inbox_view(
            &mailbox,
            &InboxQuery {
                search: Some("TRANSFER".to_string()),
            },
        );
        assert!(!view.messages.is_empty());
        assert!(view.messages.len() < mailbox.len());
        for m in &view.messages {
            let needle = "transfer";
            assert!(
                m.subject.to_lowercase().contains(needle)
                    || m.from.to_lowercase().contains(needle)
                    || m.preview.to_lowercase().contains(needle)
            );
        }
        assert_eq!(mailbox, before);

        let by_sender = inbox_view(
            &mailbox,
            &InboxQuery {
                search: Some("youth academy".to_string()),
            },
        );
        assert_eq!(by_sender.messages.len(), 1);
    }

    #[test]
    fn test_inbox_unread_count_follows_filter() {
        let mailbox = inbox_messages();
        let view = inbox_view(
            &mailbox,
            &InboxQuery {
                search: Some("fitness".to_string()),
            },
        );
        // The only fitness message is already read.
        assert_eq!(view.messages.len(), 1);
        assert_eq!(view.unread_count, 0);
    }
}
