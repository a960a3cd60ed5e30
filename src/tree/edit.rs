use crate::domain::{Board, Entity, EntityKind, Item, LaneData, Path};
use crate::error::{KanbanError, Result};
use crate::tree::resolve::{get_children, lane_at};
use std::sync::Arc;

/// A localized change applied to the entity at a path by [`update_entity`]
#[derive(Debug, Clone)]
pub enum EntityPatch {
    /// Swap the whole entity for another of the same kind and id
    Replace(Entity),
    /// Replace a lane's items, keeping its id and data
    SetChildren(Vec<Arc<Item>>),
    /// Replace a lane's data, keeping its id and items
    SetLaneData(LaneData),
}

impl EntityPatch {
    fn apply(self, current: &Entity, path: &Path) -> Result<Entity> {
        match self {
            Self::Replace(entity) => {
                entity.expect_kind(path, current.kind())?;
                if entity.id() != current.id() {
                    return Err(KanbanError::EntityIdMismatch {
                        path: path.clone(),
                        expected: current.id().clone(),
                        found: entity.id().clone(),
                    });
                }
                Ok(entity)
            }
            Self::SetChildren(children) => {
                let lane = current
                    .as_lane()
                    .ok_or_else(|| current.mismatch(path, EntityKind::Lane))?;
                Ok(Entity::Lane(Arc::new(lane.with_children(children))))
            }
            Self::SetLaneData(data) => {
                let lane = current
                    .as_lane()
                    .ok_or_else(|| current.mismatch(path, EntityKind::Lane))?;
                let mut next = lane.with_children(lane.children.clone());
                next.data = data;
                Ok(Entity::Lane(Arc::new(next)))
            }
        }
    }
}

/// Inserts `entity` at `path`, shifting the entity currently there and all
/// later siblings one position right. Inserting one past the last child
/// appends.
pub fn insert_entity(board: &Board, path: &Path, entity: Entity) -> Result<Board> {
    let (parent, index) = split(path)?;
    entity.expect_kind(path, child_kind(&parent)?)?;

    edit_children(board, &parent, |children| {
        if index > children.len() {
            return Err(KanbanError::not_found(path));
        }
        children.insert(index, entity);
        Ok(())
    })
}

/// Removes the entity at `path`, shifting later siblings one position left
pub fn remove_entity(board: &Board, path: &Path) -> Result<Board> {
    let (parent, index) = split(path)?;

    edit_children(board, &parent, |children| {
        if index >= children.len() {
            return Err(KanbanError::not_found(path));
        }
        children.remove(index);
        Ok(())
    })
}

/// Applies `patch` to the entity at `path`, leaving its siblings untouched
pub fn update_entity(board: &Board, path: &Path, patch: EntityPatch) -> Result<Board> {
    let (parent, index) = split(path)?;

    edit_children(board, &parent, |children| {
        let current = children
            .get(index)
            .ok_or_else(|| KanbanError::not_found(path))?;
        let next = patch.apply(current, path)?;
        children[index] = next;
        Ok(())
    })
}

/// Adds `entities` after the existing children of `parent`
pub fn append_entities(board: &Board, parent: &Path, entities: Vec<Entity>) -> Result<Board> {
    check_kinds(parent, &entities)?;
    edit_children(board, parent, |children| {
        children.extend(entities);
        Ok(())
    })
}

/// Adds `entities`, in order, before the existing children of `parent`
pub fn prepend_entities(board: &Board, parent: &Path, entities: Vec<Entity>) -> Result<Board> {
    check_kinds(parent, &entities)?;
    edit_children(board, parent, |children| {
        children.splice(0..0, entities);
        Ok(())
    })
}

fn split(path: &Path) -> Result<(Path, usize)> {
    match (path.parent(), path.last()) {
        (Some(parent), Some(index)) => Ok((parent, index)),
        _ => Err(KanbanError::not_found(path)),
    }
}

/// Kind of entity held by the sequence at `parent`
fn child_kind(parent: &Path) -> Result<EntityKind> {
    match parent.len() {
        0 => Ok(EntityKind::Lane),
        1 => Ok(EntityKind::Item),
        _ => Err(KanbanError::not_found(parent)),
    }
}

fn check_kinds(parent: &Path, entities: &[Entity]) -> Result<()> {
    let expected = child_kind(parent)?;
    entities
        .iter()
        .try_for_each(|entity| entity.expect_kind(parent, expected))
}

/// Rebuilds the sequence at `parent` after `edit` has run on a copy of it.
///
/// Only the lanes on the edited path get new allocations; every other lane
/// and item is carried over by reference.
fn edit_children<F>(board: &Board, parent: &Path, edit: F) -> Result<Board>
where
    F: FnOnce(&mut Vec<Entity>) -> Result<()>,
{
    let mut children = get_children(board, parent)?;
    edit(&mut children)?;

    let lanes = match parent.as_slice() {
        [] => children
            .into_iter()
            .enumerate()
            .map(|(i, child)| child.into_lane(&parent.child(i)))
            .collect::<Result<Vec<_>>>()?,
        [lane_index] => {
            let lane = lane_at(board, parent)?;
            let items = children
                .into_iter()
                .enumerate()
                .map(|(i, child)| child.into_item(&parent.child(i)))
                .collect::<Result<Vec<_>>>()?;

            let mut lanes = board.lanes.clone();
            lanes[*lane_index] = Arc::new(lane.with_children(items));
            lanes
        }
        _ => return Err(KanbanError::not_found(parent)),
    };

    Ok(Board {
        lanes,
        archive: Arc::clone(&board.archive),
    })
}
