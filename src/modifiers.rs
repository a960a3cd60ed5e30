//! Board-level editing operations.
//!
//! Each operation hands a pure transform to the [`StateManager`] and reports
//! a [`BoardEvent`]. Additions and lane updates are announced before the
//! transform is submitted. Archive, delete, item update and duplicate
//! operations announce from inside the transform, after reading the entity
//! they act on and before the new board is returned, so listeners still
//! see the old board as current.

use crate::archive::{ArchiveSink, DateFormatter, LocalClock};
use crate::config::ArchiveSettings;
use crate::domain::{Board, Entity, Item, Lane, Path};
use crate::error::{KanbanError, Result};
use crate::events::{BoardEvent, NotificationSink, TracingSink};
use crate::ids::{IdGenerator, UuidGenerator};
use crate::state::StateManager;
use crate::tree::{
    append_entities, get_entity_from_path, insert_entity, prepend_entities, remove_entity,
    update_entity, EntityPatch,
};
use std::sync::Arc;

pub struct BoardModifiers {
    state: Arc<dyn StateManager>,
    notifier: Arc<dyn NotificationSink>,
    ids: Arc<dyn IdGenerator>,
    archive: ArchiveSink,
}

impl BoardModifiers {
    /// Creates modifiers over `state` that log events, generate UUID ids
    /// and stamp archive dates with the local clock.
    pub fn new(state: Arc<dyn StateManager>, settings: ArchiveSettings) -> Self {
        Self {
            state,
            notifier: Arc::new(TracingSink),
            ids: Arc::new(UuidGenerator),
            archive: ArchiveSink::new(settings, Arc::new(LocalClock)),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_date_formatter(mut self, dates: Arc<dyn DateFormatter>) -> Self {
        self.archive = self.archive.with_date_formatter(dates);
        self
    }

    /// Adds `items` after the existing children of `parent`
    pub fn append_items(&self, parent: &Path, items: Vec<Item>) -> Result<()> {
        let entities = self.announce_cards(items);
        self.commit(|board| append_entities(board, parent, entities))
    }

    /// Adds `items`, in order, before the existing children of `parent`
    pub fn prepend_items(&self, parent: &Path, items: Vec<Item>) -> Result<()> {
        let entities = self.announce_cards(items);
        self.commit(|board| prepend_entities(board, parent, entities))
    }

    /// Appends `lane` to the board
    pub fn add_lane(&self, lane: Lane) -> Result<()> {
        let lane = Arc::new(lane);
        self.emit(BoardEvent::LaneAdded {
            lane: Arc::clone(&lane),
        });
        self.commit(|board| append_entities(board, &Path::root(), vec![Entity::Lane(lane)]))
    }

    /// Replaces the lane at `path`
    pub fn update_lane(&self, path: &Path, lane: Lane) -> Result<()> {
        let lane = Arc::new(lane);
        self.emit(BoardEvent::LaneUpdated {
            lane: Arc::clone(&lane),
        });
        self.commit(|board| update_entity(board, path, EntityPatch::Replace(Entity::Lane(lane))))
    }

    /// Removes the lane at `path` and archives its items
    pub fn archive_lane(&self, path: &Path) -> Result<()> {
        self.commit(|board| {
            let lane = get_entity_from_path(board, path)?.into_lane(path)?;
            self.emit(BoardEvent::LaneArchived {
                lane: Arc::clone(&lane),
            });

            let next = remove_entity(board, path)?;
            Ok(self.archive.archive_items(next, &lane.children))
        })
    }

    /// Empties the lane at `path`, archiving its items
    pub fn archive_lane_items(&self, path: &Path) -> Result<()> {
        self.commit(|board| {
            let lane = get_entity_from_path(board, path)?.into_lane(path)?;
            let items = lane.children.clone();
            self.emit(BoardEvent::LaneCardsArchived {
                items: items.clone(),
            });

            let next = update_entity(board, path, EntityPatch::SetChildren(Vec::new()))?;
            Ok(self.archive.archive_items(next, &items))
        })
    }

    /// Permanently removes the lane or item at `path`
    pub fn delete_entity(&self, path: &Path) -> Result<()> {
        self.commit(|board| {
            let entity = get_entity_from_path(board, path)?;
            self.emit(BoardEvent::EntityDeleted { entity });
            remove_entity(board, path)
        })
    }

    /// Replaces the item at `path`
    pub fn update_item(&self, path: &Path, item: Item) -> Result<()> {
        self.commit(|board| {
            let old = get_entity_from_path(board, path)?.into_item(path)?;
            let new = Arc::new(item);
            self.emit(BoardEvent::CardUpdated {
                old,
                new: Arc::clone(&new),
            });
            update_entity(board, path, EntityPatch::Replace(Entity::Item(new)))
        })
    }

    /// Removes the item at `path` and archives it
    pub fn archive_item(&self, path: &Path) -> Result<()> {
        self.commit(|board| {
            let item = get_entity_from_path(board, path)?.into_item(path)?;
            self.emit(BoardEvent::CardArchived {
                path: path.clone(),
                item: Arc::clone(&item),
            });

            let next = remove_entity(board, path)?;
            Ok(self.archive.archive_items(next, &[item]))
        })
    }

    /// Copies the entity at `path` under fresh ids and places the copy
    /// directly after the original.
    pub fn duplicate_entity(&self, path: &Path) -> Result<()> {
        self.commit(|board| {
            let entity = get_entity_from_path(board, path)?;
            self.emit(BoardEvent::EntityDuplicated {
                path: path.clone(),
                entity: entity.clone(),
            });

            let after = path
                .last()
                .and_then(|index| path.with_last(index + 1))
                .ok_or_else(|| KanbanError::not_found(path))?;
            insert_entity(board, &after, self.with_fresh_ids(&entity))
        })
    }

    fn commit<F>(&self, transform: F) -> Result<()>
    where
        F: FnOnce(&Board) -> Result<Board>,
    {
        self.state.set_state(Box::new(transform))
    }

    fn emit(&self, event: BoardEvent) {
        self.notifier.emit(&event);
    }

    fn announce_cards(&self, items: Vec<Item>) -> Vec<Entity> {
        items
            .into_iter()
            .map(|item| {
                let item = Arc::new(item);
                self.emit(BoardEvent::CardAdded {
                    item: Arc::clone(&item),
                });
                Entity::Item(item)
            })
            .collect()
    }

    /// Clone of `entity` with a new id. Lanes also renew their items' ids so
    /// no id appears twice on the board.
    fn with_fresh_ids(&self, entity: &Entity) -> Entity {
        match entity {
            Entity::Item(item) => Entity::Item(Arc::new(self.renew_item(item))),
            Entity::Lane(lane) => {
                let id = self.ids.generate();
                let children = lane
                    .children
                    .iter()
                    .map(|item| Arc::new(self.renew_item(item)))
                    .collect();
                let mut copy = lane.with_children(children);
                copy.id = id;
                Entity::Lane(Arc::new(copy))
            }
        }
    }

    fn renew_item(&self, item: &Item) -> Item {
        Item {
            id: self.ids.generate(),
            data: item.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::FixedClock;
    use crate::events::{self, RecordingSink};
    use crate::ids::SequentialIds;
    use crate::state::BoardState;
    use chrono::NaiveDate;

    struct Fixture {
        state: Arc<BoardState>,
        sink: Arc<RecordingSink>,
        modifiers: BoardModifiers,
    }

    fn fixture_with(settings: ArchiveSettings) -> Fixture {
        let board = Board::new([
            Lane::new("todo", "Todo").with_items([Item::new("a", "A"), Item::new("b", "B")]),
            Lane::new("done", "Done").with_items([Item::new("c", "C")]),
        ]);
        let state = Arc::new(BoardState::new(board));
        let sink = Arc::new(RecordingSink::new());
        let at = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        let modifiers = BoardModifiers::new(state.clone(), settings)
            .with_notifier(sink.clone())
            .with_id_generator(Arc::new(SequentialIds::new("dup")))
            .with_date_formatter(Arc::new(FixedClock(at)));

        Fixture {
            state,
            sink,
            modifiers,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(ArchiveSettings::default())
    }

    fn item_ids(board: &Board, lane: usize) -> Vec<String> {
        board.lanes[lane]
            .children
            .iter()
            .map(|item| item.id.to_string())
            .collect()
    }

    fn archive_titles(board: &Board) -> Vec<String> {
        board
            .archive
            .iter()
            .filter_map(|entry| entry.as_item())
            .map(|item| item.title_raw().to_string())
            .collect()
    }

    #[test]
    fn test_append_and_prepend_items() {
        let f = fixture();
        f.modifiers
            .append_items(&Path::from([1]), vec![Item::new("x", "X"), Item::new("y", "Y")])
            .unwrap();
        f.modifiers
            .prepend_items(&Path::from([1]), vec![Item::new("p", "P"), Item::new("q", "Q")])
            .unwrap();

        let board = f.state.current();
        assert_eq!(item_ids(&board, 1), vec!["p", "q", "c", "x", "y"]);
        assert_eq!(f.sink.names(), vec![events::CARD_ADDED; 4]);
    }

    #[test]
    fn test_append_items_to_missing_lane_fails_without_commit() {
        let f = fixture();
        let before = f.state.current();

        let err = f
            .modifiers
            .append_items(&Path::from([5]), vec![Item::new("x", "X")])
            .unwrap_err();

        assert!(err.is_lookup());
        assert!(Arc::ptr_eq(&before, &f.state.current()));
        // Announced before the commit was attempted
        assert_eq!(f.sink.names(), vec![events::CARD_ADDED]);
    }

    #[test]
    fn test_add_and_update_lane() {
        let f = fixture();
        f.modifiers.add_lane(Lane::new("later", "Later")).unwrap();
        f.modifiers
            .update_lane(&Path::from([2]), Lane::new("later", "Someday"))
            .unwrap();

        let board = f.state.current();
        assert_eq!(board.lanes.len(), 3);
        assert_eq!(board.lanes[2].data.title, "Someday");
        assert_eq!(
            f.sink.names(),
            vec![events::LANE_ADDED, events::LANE_UPDATED]
        );
    }

    #[test]
    fn test_update_lane_on_item_path_fails() {
        let f = fixture();
        let err = f
            .modifiers
            .update_lane(&Path::from([0, 0]), Lane::new("x", "X"))
            .unwrap_err();
        assert!(err.is_lookup());
    }

    #[test]
    fn test_update_lane_cannot_change_id() {
        let f = fixture();
        let before = f.state.current();

        let err = f
            .modifiers
            .update_lane(&Path::from([0]), Lane::new("done", "Todo renamed"))
            .unwrap_err();

        assert!(matches!(err, KanbanError::EntityIdMismatch { .. }));
        assert!(Arc::ptr_eq(&before, &f.state.current()));
        assert_eq!(f.state.current().lanes[0].id.as_str(), "todo");
        assert_eq!(f.sink.names(), vec![events::LANE_UPDATED]);
    }

    #[test]
    fn test_update_item_cannot_change_id() {
        let f = fixture();
        let before = f.state.current();

        let err = f
            .modifiers
            .update_item(&Path::from([0, 0]), Item::new("c", "A edited"))
            .unwrap_err();

        assert!(matches!(err, KanbanError::EntityIdMismatch { .. }));
        assert!(Arc::ptr_eq(&before, &f.state.current()));
        assert_eq!(f.state.current().lanes[0].children[0].title_raw(), "A");
        assert_eq!(f.sink.names(), vec![events::CARD_UPDATED]);
    }

    #[test]
    fn test_archive_lane_moves_items_to_archive() {
        let f = fixture();
        f.modifiers.archive_lane(&Path::from([0])).unwrap();

        let board = f.state.current();
        assert_eq!(board.lanes.len(), 1);
        assert_eq!(board.lanes[0].id.as_str(), "done");
        assert_eq!(archive_titles(&board), vec!["A", "B"]);

        match &f.sink.events()[..] {
            [BoardEvent::LaneArchived { lane }] => assert_eq!(lane.id.as_str(), "todo"),
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_archive_lane_items_keeps_lane() {
        let f = fixture_with(ArchiveSettings::default().with_date_stamp("YYYY-MM-DD", Some("|")));
        f.modifiers.archive_lane_items(&Path::from([0])).unwrap();

        let board = f.state.current();
        assert_eq!(board.lanes.len(), 2);
        assert!(board.lanes[0].children.is_empty());
        assert_eq!(board.lanes[0].id.as_str(), "todo");
        assert_eq!(
            archive_titles(&board),
            vec!["2024-01-05 | A", "2024-01-05 | B"]
        );
        assert_eq!(f.sink.names(), vec![events::LANE_CARDS_ARCHIVED]);
    }

    #[test]
    fn test_archive_item_with_date_stamp() {
        let f = fixture_with(ArchiveSettings::default().with_date_stamp("YYYY-MM-DD", None));
        f.modifiers.archive_item(&Path::from([0, 1])).unwrap();

        let board = f.state.current();
        assert_eq!(item_ids(&board, 0), vec!["a"]);
        assert_eq!(archive_titles(&board), vec!["2024-01-05 B"]);

        match &f.sink.events()[..] {
            [BoardEvent::CardArchived { path, item }] => {
                assert_eq!(path, &Path::from([0, 1]));
                assert_eq!(item.title_raw(), "B");
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_archive_item_on_lane_path_fails() {
        let f = fixture();
        let before = f.state.current();

        assert!(f.modifiers.archive_item(&Path::from([0])).is_err());
        assert!(Arc::ptr_eq(&before, &f.state.current()));
        assert!(f.sink.events().is_empty());
    }

    #[test]
    fn test_delete_entity_names_event_by_kind() {
        let f = fixture();
        f.modifiers.delete_entity(&Path::from([0, 0])).unwrap();
        f.modifiers.delete_entity(&Path::from([1])).unwrap();

        let board = f.state.current();
        assert_eq!(board.lanes.len(), 1);
        assert_eq!(item_ids(&board, 0), vec!["b"]);
        assert!(board.archive.is_empty());
        assert_eq!(
            f.sink.names(),
            vec![events::ITEM_DELETED, events::LANE_DELETED]
        );
    }

    #[test]
    fn test_update_item_reports_old_and_new() {
        let f = fixture();
        f.modifiers
            .update_item(&Path::from([0, 0]), Item::new("a", "A edited"))
            .unwrap();

        let board = f.state.current();
        assert_eq!(board.lanes[0].children[0].title_raw(), "A edited");

        match &f.sink.events()[..] {
            [BoardEvent::CardUpdated { old, new }] => {
                assert_eq!(old.title_raw(), "A");
                assert_eq!(new.title_raw(), "A edited");
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_item_follows_original() {
        let f = fixture();
        f.modifiers.duplicate_entity(&Path::from([0, 0])).unwrap();

        let board = f.state.current();
        assert_eq!(item_ids(&board, 0), vec!["a", "dup1", "b"]);
        assert_eq!(board.lanes[0].children[1].data, board.lanes[0].children[0].data);
        assert_eq!(f.sink.names(), vec![events::ITEM_DUPLICATED]);
    }

    #[test]
    fn test_duplicate_lane_renews_item_ids() {
        let f = fixture();
        f.modifiers.duplicate_entity(&Path::from([0])).unwrap();

        let board = f.state.current();
        let lane_ids: Vec<&str> = board.lanes.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(lane_ids, vec!["todo", "dup1", "done"]);
        assert_eq!(item_ids(&board, 1), vec!["dup2", "dup3"]);
        assert_eq!(board.lanes[1].data, board.lanes[0].data);
        assert_eq!(f.sink.names(), vec![events::LANE_DUPLICATED]);
    }

    #[test]
    fn test_in_transform_events_see_old_board() {
        struct Probe {
            state: Arc<BoardState>,
            seen: std::sync::Mutex<Vec<usize>>,
        }

        impl NotificationSink for Probe {
            fn emit(&self, _event: &BoardEvent) {
                let lanes = self.state.current().lanes.len();
                self.seen.lock().unwrap().push(lanes);
            }
        }

        let f = fixture();
        let probe = Arc::new(Probe {
            state: f.state.clone(),
            seen: std::sync::Mutex::new(Vec::new()),
        });
        let modifiers = BoardModifiers::new(f.state.clone(), ArchiveSettings::default())
            .with_notifier(probe.clone());

        modifiers.delete_entity(&Path::from([0])).unwrap();

        assert_eq!(*probe.seen.lock().unwrap(), vec![2]);
        assert_eq!(f.state.current().lanes.len(), 1);
    }
}
