//! Moving items out of the live tree and into the board's archive

pub mod date_format;

pub use date_format::DateFormat;

use crate::config::ArchiveSettings;
use crate::domain::{Board, Entity, Item};
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

/// Renders the current time with a date pattern
pub trait DateFormatter: Send + Sync {
    fn format(&self, pattern: &DateFormat) -> String;
}

/// Formats the local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl DateFormatter for LocalClock {
    fn format(&self, pattern: &DateFormat) -> String {
        pattern.render(&Local::now().naive_local())
    }
}

/// Always formats the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl DateFormatter for FixedClock {
    fn format(&self, pattern: &DateFormat) -> String {
        pattern.render(&self.0)
    }
}

/// Turns removed items into archive entries, date-stamping them when the
/// settings ask for it.
pub struct ArchiveSink {
    settings: ArchiveSettings,
    format: DateFormat,
    dates: Arc<dyn DateFormatter>,
}

impl ArchiveSink {
    pub fn new(settings: ArchiveSettings, dates: Arc<dyn DateFormatter>) -> Self {
        let format = match DateFormat::parse(&settings.archive_date_format) {
            Ok(format) => format,
            Err(e) => {
                if settings.prepend_archive_date {
                    tracing::warn!(
                        pattern = %settings.archive_date_format,
                        error = %e,
                        "falling back to literal archive date rendering"
                    );
                }
                DateFormat::parse_lossy(&settings.archive_date_format)
            }
        };

        Self {
            settings,
            format,
            dates,
        }
    }

    pub fn with_date_formatter(mut self, dates: Arc<dyn DateFormatter>) -> Self {
        self.dates = dates;
        self
    }

    /// Appends `items`, in order, to the board's archive
    pub fn archive_items(&self, mut board: Board, items: &[Arc<Item>]) -> Board {
        let stamp = self.date_stamp();
        Arc::make_mut(&mut board.archive).extend(
            items
                .iter()
                .map(|item| Entity::Item(self.stamp_with(stamp.as_deref(), item))),
        );
        board
    }

    /// The archived form of `item`
    pub fn stamp(&self, item: &Arc<Item>) -> Arc<Item> {
        self.stamp_with(self.date_stamp().as_deref(), item)
    }

    /// Prefix for archived titles: the rendered date plus the separator.
    /// `None` when stamping is off or the date rendered empty.
    fn date_stamp(&self) -> Option<String> {
        if !self.settings.prepend_archive_date {
            return None;
        }

        let date = self.dates.format(&self.format);
        if date.is_empty() {
            return None;
        }

        Some(match &self.settings.archive_date_separator {
            Some(separator) => format!("{} {}", date, separator),
            None => date,
        })
    }

    fn stamp_with(&self, stamp: Option<&str>, item: &Arc<Item>) -> Arc<Item> {
        match stamp {
            Some(stamp) => Arc::new(item.with_title_raw(format!("{} {}", stamp, item.title_raw()))),
            None => Arc::clone(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn clock() -> Arc<dyn DateFormatter> {
        let at = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        Arc::new(FixedClock(at))
    }

    fn milk() -> Arc<Item> {
        Arc::new(Item::new("m", "Buy milk"))
    }

    #[test]
    fn test_stamp_with_separator() {
        let settings = ArchiveSettings::default().with_date_stamp("YYYY-MM-DD", Some("|"));
        let sink = ArchiveSink::new(settings, clock());
        assert_eq!(sink.stamp(&milk()).title_raw(), "2024-01-05 | Buy milk");
    }

    #[test]
    fn test_stamp_without_separator() {
        let settings = ArchiveSettings::default().with_date_stamp("YYYY-MM-DD", None);
        let sink = ArchiveSink::new(settings, clock());

        let stamped = sink.stamp(&milk());
        assert_eq!(stamped.title_raw(), "2024-01-05 Buy milk");
        assert_eq!(stamped.data.title, "2024-01-05 Buy milk");
        assert_eq!(stamped.id.as_str(), "m");
    }

    #[test]
    fn test_no_stamp_when_disabled_shares_item() {
        let sink = ArchiveSink::new(ArchiveSettings::default(), clock());
        let item = milk();
        assert!(Arc::ptr_eq(&sink.stamp(&item), &item));
    }

    #[test]
    fn test_malformed_format_falls_back_to_literal() {
        let settings = ArchiveSettings::default().with_date_stamp("YYYY [done", None);
        let sink = ArchiveSink::new(settings, clock());
        assert_eq!(sink.stamp(&milk()).title_raw(), "2024 done Buy milk");
    }

    #[test]
    fn test_empty_format_stamps_iso_date() {
        let settings = ArchiveSettings::default().with_date_stamp("", Some("|"));
        let sink = ArchiveSink::new(settings, clock());
        assert_eq!(
            sink.stamp(&milk()).title_raw(),
            "2024-01-05T10:30:00 | Buy milk"
        );
    }

    #[test]
    fn test_format_rendering_empty_leaves_title_unchanged() {
        let settings = ArchiveSettings::default().with_date_stamp("[]", Some("|"));
        let sink = ArchiveSink::new(settings, clock());
        assert_eq!(sink.stamp(&milk()).title_raw(), "Buy milk");
    }

    #[test]
    fn test_archive_items_appends_in_order() {
        let sink = ArchiveSink::new(ArchiveSettings::default(), clock());
        let mut board = Board::default();
        Arc::make_mut(&mut board.archive).push(Entity::from(Item::new("old", "Old")));

        let items = vec![Arc::new(Item::new("a", "A")), Arc::new(Item::new("b", "B"))];
        let board = sink.archive_items(board, &items);

        let ids: Vec<&str> = board.archive.iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["old", "a", "b"]);
    }
}
