//! Pure views and aggregates over a record collection. Every function takes the
//! collection explicitly and returns a fresh result; none of them mutate or
//! cache anything.

use crate::error::ViewError;
use crate::models::GameRecord;
use crate::render::format_currency;

/// Games that have not reached their goal, in collection order.
pub fn filter_unfunded(records: &[GameRecord]) -> Vec<&GameRecord> {
    records.iter().filter(|game| !game.is_funded()).collect()
}

/// Games whose pledges meet or exceed their goal, in collection order.
pub fn filter_funded(records: &[GameRecord]) -> Vec<&GameRecord> {
    records.iter().filter(|game| game.is_funded()).collect()
}

/// Case-insensitive substring match against the game name. An empty term
/// keeps every record.
pub fn search<'a>(records: &'a [GameRecord], term: &str) -> Vec<&'a GameRecord> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|game| game.name().to_lowercase().contains(&needle))
        .collect()
}

/// Sum of backer counts. Fails instead of wrapping when the total does not
/// fit in a `u64`.
pub fn total_backers(records: &[GameRecord]) -> Result<u64, ViewError> {
    records
        .iter()
        .try_fold(0u64, |total, game| total.checked_add(game.backers()))
        .ok_or(ViewError::AggregateOverflow("total backers"))
}

pub fn total_pledged(records: &[GameRecord]) -> f64 {
    records.iter().map(GameRecord::pledged).sum()
}

pub fn unfunded_count(records: &[GameRecord]) -> usize {
    records.iter().filter(|game| !game.is_funded()).count()
}

/// The `n` best-funded games, highest pledge first. Equal pledges keep their
/// collection order. Asking for more games than exist is an error rather than
/// a short answer.
pub fn top_by_pledged(records: &[GameRecord], n: usize) -> Result<Vec<&GameRecord>, ViewError> {
    if n > records.len() {
        return Err(ViewError::NotEnoughRecords {
            requested: n,
            available: records.len(),
        });
    }
    let mut ranked: Vec<&GameRecord> = records.iter().collect();
    // `sort_by` is stable, which is what keeps ties in collection order.
    ranked.sort_by(|a, b| b.pledged().total_cmp(&a.pledged()));
    ranked.truncate(n);
    Ok(ranked)
}

pub fn top_two_by_pledged(
    records: &[GameRecord],
) -> Result<(&GameRecord, &GameRecord), ViewError> {
    match top_by_pledged(records, 2)?.as_slice() {
        [first, second] => Ok((*first, *second)),
        _ => Err(ViewError::NotEnoughRecords {
            requested: 2,
            available: records.len(),
        }),
    }
}

/// Headline numbers for the stats panel and the summary paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary<'a> {
    /// `None` when the backer counts overflow a `u64`.
    pub total_backers: Option<u64>,
    pub total_pledged: f64,
    pub game_count: usize,
    pub unfunded_count: usize,
    /// `None` when the collection holds fewer than two games.
    pub top_two: Option<(&'a GameRecord, &'a GameRecord)>,
}

impl<'a> Summary<'a> {
    pub fn compute(records: &'a [GameRecord]) -> Self {
        Self {
            total_backers: total_backers(records).ok(),
            total_pledged: total_pledged(records),
            game_count: records.len(),
            unfunded_count: unfunded_count(records),
            top_two: top_two_by_pledged(records).ok(),
        }
    }

    /// Sentence shown beneath the stats, pluralized on the unfunded count.
    pub fn sentence(&self) -> String {
        let remains = if self.unfunded_count == 1 {
            "game remains"
        } else {
            "games remain"
        };
        format!(
            "A total of {} has been raised for {} games. Currently, {} {} unfunded. \
             We need your help to fund more games!",
            format_currency(self.total_pledged),
            self.game_count,
            self.unfunded_count,
            remains
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, pledged: f64, goal: f64, backers: u64) -> GameRecord {
        GameRecord::new(name, "", "", pledged, goal, backers).unwrap()
    }

    fn pair() -> Vec<GameRecord> {
        vec![game("A", 100.0, 200.0, 5), game("B", 300.0, 250.0, 10)]
    }

    fn names(records: &[&GameRecord]) -> Vec<String> {
        records.iter().map(|game| game.name().to_string()).collect()
    }

    #[test]
    fn two_game_scenario() {
        let games = pair();
        assert_eq!(names(&filter_funded(&games)), ["B"]);
        assert_eq!(names(&filter_unfunded(&games)), ["A"]);
        assert_eq!(total_backers(&games), Ok(15));
        assert_eq!(total_pledged(&games), 400.0);
        let (first, second) = top_two_by_pledged(&games).unwrap();
        assert_eq!((first.name(), second.name()), ("B", "A"));
        assert_eq!(names(&search(&games, "b")), ["B"]);
    }

    #[test]
    fn empty_collection_aggregates_to_zero() {
        assert_eq!(total_backers(&[]), Ok(0));
        assert_eq!(total_pledged(&[]), 0.0);
        assert_eq!(unfunded_count(&[]), 0);
        assert!(search(&[], "").is_empty());
    }

    #[test]
    fn search_ignores_case_and_empty_term_is_identity() {
        let games = vec![
            game("Game Night", 1.0, 2.0, 0),
            game("Space Race", 1.0, 2.0, 0),
            game("Endgame", 1.0, 2.0, 0),
        ];
        assert_eq!(search(&games, "Game"), search(&games, "game"));
        assert_eq!(names(&search(&games, "GAME")), ["Game Night", "Endgame"]);
        assert_eq!(names(&search(&games, "")), ["Game Night", "Space Race", "Endgame"]);
        assert!(search(&games, "zzz").is_empty());
    }

    #[test]
    fn ranking_is_stable_for_equal_pledges() {
        let games = vec![
            game("First", 50.0, 100.0, 0),
            game("Big", 90.0, 100.0, 0),
            game("Second", 50.0, 100.0, 0),
            game("Third", 50.0, 100.0, 0),
        ];
        let ranked = top_by_pledged(&games, 4).unwrap();
        assert_eq!(names(&ranked), ["Big", "First", "Second", "Third"]);
    }

    #[test]
    fn ranking_more_than_available_fails() {
        let games = vec![game("Solo", 1.0, 2.0, 0)];
        assert_eq!(
            top_two_by_pledged(&games).unwrap_err(),
            ViewError::NotEnoughRecords {
                requested: 2,
                available: 1
            }
        );
        assert!(top_by_pledged(&games, 0).unwrap().is_empty());
        assert!(Summary::compute(&games).top_two.is_none());
    }

    #[test]
    fn backer_total_reports_overflow() {
        let huge = i64::MAX as u64;
        let games = vec![
            game("One", 1.0, 2.0, huge),
            game("Two", 1.0, 2.0, huge),
            game("Three", 1.0, 2.0, huge),
        ];
        assert_eq!(
            total_backers(&games),
            Err(ViewError::AggregateOverflow("total backers"))
        );
        assert_eq!(total_backers(&games[..1]), Ok(huge));

        let summary = Summary::compute(&games);
        assert!(summary.total_backers.is_none());
        assert_eq!(summary.game_count, 3);
    }

    #[test]
    fn sentence_pluralizes_unfunded_count() {
        let one = pair();
        let text = Summary::compute(&one).sentence();
        assert!(text.contains("1 game remains unfunded"), "{text}");
        assert!(text.starts_with("A total of $400 has been raised for 2 games."));

        let none = vec![game("B", 300.0, 250.0, 10)];
        assert!(Summary::compute(&none)
            .sentence()
            .contains("0 games remain unfunded"));

        let many = vec![game("X", 1.0, 2.0, 0), game("Y", 1.0, 2.0, 0)];
        assert!(Summary::compute(&many)
            .sentence()
            .contains("2 games remain unfunded"));
    }
}
