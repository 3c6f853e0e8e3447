//! # Project Model
//!
//! A project is the unit a user saves and loads: an ordered list of diagrams, the one
//! currently being edited, a global transposition offset and ownership metadata.
//!
//! ## Invariants
//! - A project always holds at least one diagram; removing the last one replaces it with
//!   a fresh diagram from the editor config.
//! - `active_id` names a diagram in the list. A hand-built or deserialised project that
//!   breaks this reads as having no active diagram.
//! - The diagram count never exceeds the configured limit (12 by default).
//! - `transposition` stays within `-11..=11`.
//!
//! ## Example
//! ```rust
//! use fretboard::config::EditorConfig;
//! use fretboard::project::Project;
//!
//! let config = EditorConfig::from_yaml("instrument: bass-4").unwrap();
//! let mut project = Project::from_config("Warm-ups", "guest", &config);
//! project.add_diagram(false, &config).unwrap();
//! assert_eq!(project.diagrams.len(), 2);
//! assert_eq!(project.active().unwrap().id, project.diagrams[1].id);
//! assert_eq!(project.active().unwrap().string_count(), 4);
//! ```

use crate::config::EditorConfig;
use crate::diagram::{new_id, Diagram};
use crate::error::{FretboardError, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Default diagram limit per project.
pub const MAX_DIAGRAMS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub diagrams: Vec<Diagram>,
    pub active_id: String,
    #[serde(default)]
    pub transposition: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// New project holding one default diagram.
    pub fn new(name: &str, owner: &str) -> Self {
        Self::with_diagram(name, owner, Diagram::default())
    }

    /// New project whose first diagram follows the config defaults.
    pub fn from_config(name: &str, owner: &str, config: &EditorConfig) -> Self {
        Self::with_diagram(name, owner, config.new_diagram())
    }

    pub fn with_diagram(name: &str, owner: &str, diagram: Diagram) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name: name.to_string(),
            owner: owner.to_string(),
            active_id: diagram.id.clone(),
            diagrams: vec![diagram],
            transposition: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// The active diagram, falling back to the first one. `None` only for an empty list.
    pub fn active(&self) -> Option<&Diagram> {
        self.diagram(&self.active_id).or_else(|| self.diagrams.first())
    }

    pub fn diagram(&self, id: &str) -> Option<&Diagram> {
        self.diagrams.iter().find(|d| d.id == id)
    }

    pub fn set_active(&mut self, id: &str) -> Result<()> {
        self.index_of(id)?;
        self.active_id = id.to_string();
        Ok(())
    }

    /// Append a fresh diagram from `config`, or a copy of the active one, and make it
    /// active. The config also supplies the diagram limit.
    pub fn add_diagram(&mut self, clone_active: bool, config: &EditorConfig) -> Result<&Diagram> {
        let diagram = match self.active() {
            Some(active) if clone_active => active.duplicate(),
            _ => config.new_diagram(),
        };
        self.push_diagram(diagram, config.max_diagrams)
    }

    /// Append `diagram` and make it active.
    pub fn push_diagram(&mut self, diagram: Diagram, limit: usize) -> Result<&Diagram> {
        if self.diagrams.len() >= limit {
            warn!("project '{}' already holds {} diagrams", self.name, limit);
            return Err(FretboardError::DiagramLimit(limit));
        }
        self.active_id = diagram.id.clone();
        self.diagrams.push(diagram);
        self.touch();
        let last = self.diagrams.len() - 1;
        Ok(&self.diagrams[last])
    }

    /// Remove a diagram. The last one is replaced by a fresh diagram from `config`; a
    /// removed active diagram hands activity to the first remaining one.
    pub fn remove_diagram(&mut self, id: &str, config: &EditorConfig) -> Result<Diagram> {
        let index = self.index_of(id)?;
        let removed = self.diagrams.remove(index);
        if self.diagrams.is_empty() {
            self.diagrams.push(config.new_diagram());
        }
        if self.active_id == id {
            self.active_id = self.diagrams[0].id.clone();
        }
        self.touch();
        Ok(removed)
    }

    /// Swap a diagram with its neighbour. Moving past either end is a no-op.
    pub fn move_diagram(&mut self, id: &str, direction: MoveDirection) -> Result<()> {
        let index = self.index_of(id)?;
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|i| *i < self.diagrams.len()),
        };
        if let Some(target) = target {
            self.diagrams.swap(index, target);
            self.touch();
        }
        Ok(())
    }

    /// Replace the diagram with the same id.
    pub fn update_diagram(&mut self, diagram: Diagram) -> Result<()> {
        let index = self.index_of(&diagram.id)?;
        self.diagrams[index] = diagram;
        self.touch();
        Ok(())
    }

    /// Set the global transposition. The change from the current offset is applied to
    /// every diagram; markers keep their relative pitch near their old frets.
    pub fn set_transposition(&mut self, offset: i32) {
        let offset = offset % 12;
        let delta = offset - self.transposition;
        if delta == 0 {
            return;
        }
        debug!("transposing project '{}' by {} semitones", self.name, delta);
        for diagram in &mut self.diagrams {
            diagram.transpose(delta);
        }
        self.transposition = offset;
        self.touch();
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.diagrams
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| FretboardError::DiagramNotFound(id.to_string()))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{Marker, MarkerShape};
    use crate::fretmap::Position;
    use crate::pitch::PitchClass::*;

    fn config() -> EditorConfig {
        EditorConfig::default()
    }

    fn ids(project: &Project) -> Vec<String> {
        project.diagrams.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn test_new_project_has_one_active_diagram() {
        let project = Project::new("Scales", "ana");
        assert_eq!(project.diagrams.len(), 1);
        assert_eq!(project.active().unwrap().id, project.active_id);
        assert_eq!(project.owner, "ana");
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_add_clone_copies_active() {
        let mut project = Project::new("Scales", "ana");
        project.diagrams[0].title = "Pentatonic box 1".into();
        let clone_id = project.add_diagram(true, &config()).unwrap().id.clone();
        assert_eq!(project.active_id, clone_id);
        assert_eq!(project.active().unwrap().title, "Pentatonic box 1");
        assert_ne!(clone_id, project.diagrams[0].id);
        project.add_diagram(false, &config()).unwrap();
        assert_eq!(project.active().unwrap().title, "Fretboard Diagram");
    }

    #[test]
    fn test_diagram_limit() {
        let mut project = Project::new("Scales", "ana");
        for _ in 1..MAX_DIAGRAMS {
            project.add_diagram(false, &config()).unwrap();
        }
        let err = project.add_diagram(false, &config()).unwrap_err();
        assert_eq!(err.to_string(), "Diagram limit reached (12 per project)");
        assert_eq!(project.diagrams.len(), 12);
    }

    #[test]
    fn test_remove_last_diagram_leaves_fresh_default() {
        let mut project = Project::new("Scales", "ana");
        let only = project.active_id.clone();
        project.remove_diagram(&only, &config()).unwrap();
        assert_eq!(project.diagrams.len(), 1);
        assert_ne!(project.active_id, only);
        assert_eq!(project.active().unwrap().id, project.active_id);
    }

    #[test]
    fn test_remove_active_moves_to_first() {
        let mut project = Project::new("Scales", "ana");
        let first = project.active_id.clone();
        let second = project.add_diagram(false, &config()).unwrap().id.clone();
        project.remove_diagram(&second, &config()).unwrap();
        assert_eq!(project.active_id, first);
        assert!(matches!(
            project.remove_diagram("nope", &config()),
            Err(FretboardError::DiagramNotFound(_))
        ));
    }

    #[test]
    fn test_move_diagram() {
        let mut project = Project::new("Scales", "ana");
        project.add_diagram(false, &config()).unwrap();
        project.add_diagram(false, &config()).unwrap();
        let before = ids(&project);
        project.move_diagram(&before[2], MoveDirection::Up).unwrap();
        assert_eq!(ids(&project), vec![before[0].clone(), before[2].clone(), before[1].clone()]);
        project.move_diagram(&before[0], MoveDirection::Up).unwrap();
        project.move_diagram(&before[1], MoveDirection::Down).unwrap();
        assert_eq!(ids(&project), vec![before[0].clone(), before[2].clone(), before[1].clone()]);
    }

    #[test]
    fn test_update_diagram() {
        let mut project = Project::new("Scales", "ana");
        let mut diagram = project.active().unwrap().clone();
        diagram.root = G;
        project.update_diagram(diagram).unwrap();
        assert_eq!(project.active().unwrap().root, G);
        assert!(project.update_diagram(Diagram::default()).is_err());
    }

    #[test]
    fn test_transposition_applies_delta() {
        let mut project = Project::new("Scales", "ana");
        project.diagrams[0]
            .markers
            .push(Marker::new(Position::new(5, 3), MarkerShape::Circle, "#ef4444"));
        project.set_transposition(2);
        assert_eq!(project.active().unwrap().root, D);
        assert_eq!(project.active().unwrap().markers[0].fret, 5);
        project.set_transposition(-1);
        assert_eq!(project.transposition, -1);
        assert_eq!(project.active().unwrap().root, B);
        assert_eq!(project.active().unwrap().markers[0].fret, 2);
        project.set_transposition(13);
        assert_eq!(project.transposition, 1);
        assert_eq!(project.active().unwrap().root, Cs);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let project = Project::new("Scales", "ana");
        let json = serde_json::to_value(&project).unwrap();
        assert!(json.get("activeId").is_some());
        assert!(json.get("createdAt").is_some());
        let back: Project = serde_json::from_value(json).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn test_new_diagrams_follow_config() {
        let config = EditorConfig::from_yaml("instrument: bass-4\nroot: Eb\nend-fret: 12").unwrap();
        let mut project = Project::from_config("Grooves", "ana", &config);
        assert_eq!(project.diagrams[0].string_count(), 4);

        let added = project.add_diagram(false, &config).unwrap();
        assert_eq!(added.string_count(), 4);
        assert_eq!(added.root, Ds);
        assert_eq!(added.end_fret, 12);

        let ids = ids(&project);
        for id in &ids {
            project.remove_diagram(id, &config).unwrap();
        }
        let refill = project.active().unwrap();
        assert!(!ids.contains(&refill.id));
        assert_eq!(refill.string_count(), 4);
        assert_eq!(refill.root, Ds);
    }

    #[test]
    fn test_limit_comes_from_config() {
        let config = EditorConfig::from_yaml("max-diagrams: 2").unwrap();
        let mut project = Project::from_config("Grooves", "ana", &config);
        project.add_diagram(true, &config).unwrap();
        assert!(matches!(
            project.add_diagram(false, &config),
            Err(FretboardError::DiagramLimit(2))
        ));
    }

    #[test]
    fn test_empty_project_has_no_active_diagram() {
        let mut project = Project::new("Scales", "ana");
        project.diagrams.clear();
        assert!(project.active().is_none());
        project.add_diagram(true, &config()).unwrap();
        assert_eq!(project.active().unwrap().id, project.active_id);
    }
}
