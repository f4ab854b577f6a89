use super::operations::Operations;
use crate::input::events::SemanticEvent;

/// Receives every classified event together with the operations it may apply.
pub trait EventHandler {
    fn handle(&mut self, event: &SemanticEvent, ops: &mut Operations<'_>);
}

impl<F> EventHandler for F
where
    F: FnMut(&SemanticEvent, &mut Operations<'_>),
{
    fn handle(&mut self, event: &SemanticEvent, ops: &mut Operations<'_>) {
        self(event, ops)
    }
}
