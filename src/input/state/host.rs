//! The collaborator that owns committed annotations.

use crate::draw::{Annotation, AnnotationId, Coordinate, ShapeKind};

/// Receives the outcomes of interaction.
///
/// The engine never creates or deletes annotations itself; a finished shape is
/// handed to the host, which persists it and returns its id.
pub trait AnnotationHost {
    /// A shape was finished. `edited` is the id of the annotation under edition,
    /// `None` for a new shape. Returns the id the annotation is stored under.
    fn annotation_ended(
        &mut self,
        edited: Option<&AnnotationId>,
        coordinates: Vec<Coordinate>,
        kind: ShapeKind,
    ) -> AnnotationId;

    /// Live geometry of the annotation under edition while a vertex is dragged.
    fn annotation_dragged(&mut self, _id: &AnnotationId, _coordinates: &[Coordinate]) {}

    /// An annotation was clicked while no tool was active.
    fn annotation_selected(&mut self, _id: &AnnotationId) {}

    /// Uncommitted geometry was discarded.
    fn creation_cancelled(&mut self) {}

    /// Current committed annotations, in draw order.
    fn annotations(&self) -> &[Annotation];
}

/// In-memory host assigning sequential ids and names.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    annotations: Vec<Annotation>,
    next_id: u64,
    selected: Option<AnnotationId>,
    drag_events: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing annotations; new ids continue after the largest numeric id.
    pub fn with_annotations(annotations: Vec<Annotation>) -> Self {
        let next_id = annotations
            .iter()
            .filter_map(|annotation| annotation.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            annotations,
            next_id,
            ..Self::default()
        }
    }

    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|annotation| annotation.id == id)
    }

    /// Last annotation reported as selected.
    pub fn selected(&self) -> Option<&AnnotationId> {
        self.selected.as_ref()
    }

    /// Number of drag updates received.
    pub fn drag_events(&self) -> usize {
        self.drag_events
    }

    pub fn into_annotations(self) -> Vec<Annotation> {
        self.annotations
    }
}

impl AnnotationHost for MemoryHost {
    fn annotation_ended(
        &mut self,
        edited: Option<&AnnotationId>,
        coordinates: Vec<Coordinate>,
        kind: ShapeKind,
    ) -> AnnotationId {
        let existing = edited.and_then(|id| {
            self.annotations
                .iter_mut()
                .find(|annotation| &annotation.id == id)
        });
        if let Some(existing) = existing {
            let id = existing.id.clone();
            existing.kind = kind;
            existing.is_closed = kind.is_closed();
            existing.coordinates = coordinates;
            log::info!("Updated annotation {} ({:?})", id, kind);
            return id;
        }

        self.next_id += 1;
        let id = self.next_id.to_string();
        let name = format!("Annotation {}", self.next_id);
        log::info!(
            "Created annotation {} '{}' ({:?}, {} vertices)",
            id,
            name,
            kind,
            coordinates.len()
        );
        self.annotations
            .push(Annotation::new(id.clone(), name, kind, coordinates));
        id
    }

    fn annotation_dragged(&mut self, id: &AnnotationId, coordinates: &[Coordinate]) {
        log::trace!("Annotation {} dragged: {:?}", id, coordinates);
        self.drag_events += 1;
    }

    fn annotation_selected(&mut self, id: &AnnotationId) {
        log::debug!("Annotation {} selected", id);
        self.selected = Some(id.clone());
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
