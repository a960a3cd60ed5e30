use crate::domain::{Board, Entity, Lane, Path};
use crate::error::{KanbanError, Result};
use std::sync::Arc;

/// Returns the entity at `path`.
///
/// Fails with [`KanbanError::EntityNotFound`] when any index is out of
/// range, when the path is empty (the root is a sequence, not an entity)
/// or when it descends below an item.
pub fn get_entity_from_path(board: &Board, path: &Path) -> Result<Entity> {
    match path.as_slice() {
        [lane] => board
            .lanes
            .get(*lane)
            .cloned()
            .map(Entity::Lane)
            .ok_or_else(|| KanbanError::not_found(path)),
        [lane, item] => board
            .lanes
            .get(*lane)
            .and_then(|lane| lane.children.get(*item))
            .cloned()
            .map(Entity::Item)
            .ok_or_else(|| KanbanError::not_found(path)),
        _ => Err(KanbanError::not_found(path)),
    }
}

/// Returns the children of the sequence addressed by `parent`: the lanes
/// for the root, a lane's items for a lane path.
pub fn get_children(board: &Board, parent: &Path) -> Result<Vec<Entity>> {
    match parent.as_slice() {
        [] => Ok(board.lanes.iter().cloned().map(Entity::Lane).collect()),
        [_] => Ok(lane_at(board, parent)?
            .children
            .iter()
            .cloned()
            .map(Entity::Item)
            .collect()),
        _ => Err(KanbanError::not_found(parent)),
    }
}

pub(crate) fn lane_at<'a>(board: &'a Board, path: &Path) -> Result<&'a Arc<Lane>> {
    match path.as_slice() {
        [lane] => board
            .lanes
            .get(*lane)
            .ok_or_else(|| KanbanError::not_found(path)),
        _ => Err(KanbanError::not_found(path)),
    }
}
