use crate::draw::{DrawSurface, EditedShape, Frame};

use super::AnnotationEngine;

impl AnnotationEngine {
    /// Redraws the whole surface and refreshes the cached hit regions.
    ///
    /// The working geometry is drawn as a finished shape only while an edit
    /// target is set; during creation incomplete shapes never close.
    pub fn render(&mut self, surface: &mut dyn DrawSurface) {
        let edited_style = self.selected_style.merged(self.edit_override.as_ref());
        let editing = self.edit_target.as_ref();

        let frame = Frame {
            annotations: &self.annotations,
            editing: editing.map(|annotation| &annotation.id),
            styles: &self.annotation_styles,
            edited: EditedShape {
                points: &self.points,
                style: &edited_style,
                point_styles: &self.point_styles,
                complete: editing.is_some(),
                closed: editing.is_some_and(|annotation| annotation.is_closed),
            },
        };

        self.path_cache = self.renderer.render_frame(surface, &frame);
    }
}
