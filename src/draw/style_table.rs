//! Named, priority-ranked style overrides bound to annotation ids or vertex indexes.

use super::style::{AnnotationStyle, PartialStyle};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// A named override with a priority; higher priority wins on resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StyleAssignment {
    pub name: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub style: PartialStyle,
}

impl StyleAssignment {
    pub fn new(name: impl Into<String>, priority: i32, style: PartialStyle) -> Self {
        Self {
            name: name.into(),
            priority,
            style,
        }
    }
}

/// Style assignments keyed by target (annotation id or vertex index).
///
/// A target holds at most one assignment per name; several differently named
/// assignments may stack on the same target and are ranked by priority.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable<K: Eq + Hash> {
    entries: HashMap<K, Vec<StyleAssignment>>,
}

impl<K: Eq + Hash> Default for StyleTable<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> StyleTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `assignment` to every target, replacing a same-named one.
    pub fn assign<I>(&mut self, assignment: &StyleAssignment, targets: I)
    where
        I: IntoIterator<Item = K>,
    {
        for target in targets {
            let slot = self.entries.entry(target).or_default();
            slot.retain(|existing| existing.name != assignment.name);
            slot.push(assignment.clone());
        }
    }

    /// Removes `assignment.name` from every other target, then binds it to `target`.
    pub fn exclusive_assign(&mut self, assignment: &StyleAssignment, target: K) {
        self.remove_by_name(&assignment.name);
        self.assign(assignment, [target]);
    }

    /// Drops every assignment held by the given targets.
    pub fn remove_targets<'a, I>(&mut self, targets: I)
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        for target in targets {
            self.entries.remove(target);
        }
    }

    /// Drops the named assignment from every target.
    pub fn remove_by_name(&mut self, name: &str) {
        self.entries.retain(|_, slot| {
            slot.retain(|assignment| assignment.name != name);
            !slot.is_empty()
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `target` currently holds an assignment called `name`.
    pub fn has_style(&self, target: &K, name: &str) -> bool {
        self.entries
            .get(target)
            .is_some_and(|slot| slot.iter().any(|assignment| assignment.name == name))
    }

    /// Names of every assignment bound to `target`, in binding order.
    pub fn style_names(&self, target: &K) -> Vec<String> {
        self.entries
            .get(target)
            .map(|slot| slot.iter().map(|assignment| assignment.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Targets currently holding an assignment called `name`.
    pub fn targets_with(&self, name: &str) -> Vec<K> {
        self.entries
            .iter()
            .filter(|(_, slot)| slot.iter().any(|assignment| assignment.name == name))
            .map(|(target, _)| target.clone())
            .collect()
    }

    /// Highest-priority assignment bound to `target`.
    ///
    /// Ties go to the assignment bound last.
    pub fn winning(&self, target: &K) -> Option<&StyleAssignment> {
        let slot = self.entries.get(target)?;
        let mut ranked: Vec<&StyleAssignment> = slot.iter().collect();
        ranked.sort_by_key(|assignment| assignment.priority);
        ranked.last().copied()
    }

    /// Merges `base` with the winning override for `target` only.
    ///
    /// Lower-priority matches are ignored rather than combined. A target with
    /// no assignment resolves to `base`.
    pub fn resolve(&self, base: &AnnotationStyle, target: &K) -> AnnotationStyle {
        base.merged(self.winning(target).map(|assignment| &assignment.style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{LIGHT_BLUE, RED};
    use crate::draw::style::{PartialLabelStyle, PartialLineStyle};

    fn line_color(name: &str, priority: i32, color: crate::draw::Color) -> StyleAssignment {
        StyleAssignment::new(
            name,
            priority,
            PartialStyle {
                line: Some(PartialLineStyle {
                    stroke_color: Some(color),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
    }

    fn click() -> StyleAssignment {
        StyleAssignment::new(
            "click",
            1,
            PartialStyle {
                label: Some(PartialLabelStyle {
                    fill_color: Some(LIGHT_BLUE),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
    }

    #[test]
    fn exclusive_assign_moves_the_style() {
        let mut table: StyleTable<String> = StyleTable::new();
        table.exclusive_assign(&click(), "a1".to_string());
        table.exclusive_assign(&click(), "a2".to_string());

        assert!(!table.has_style(&"a1".to_string(), "click"));
        assert!(table.has_style(&"a2".to_string(), "click"));
        assert_eq!(table.targets_with("click"), vec!["a2".to_string()]);
    }

    #[test]
    fn exclusive_style_is_held_by_at_most_one_target() {
        let mut table: StyleTable<String> = StyleTable::new();
        table.assign(&click(), ["x".to_string(), "y".to_string()]);
        for id in ["a", "b", "c", "b", "a"] {
            table.exclusive_assign(&click(), id.to_string());
            assert_eq!(table.targets_with("click").len(), 1);
        }
        assert!(table.has_style(&"a".to_string(), "click"));
    }

    #[test]
    fn highest_priority_wins_without_combining() {
        let mut table: StyleTable<&str> = StyleTable::new();
        let low = StyleAssignment::new(
            "low",
            0,
            PartialStyle {
                label: Some(PartialLabelStyle {
                    fill_color: Some(RED),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        table.assign(&low, ["a"]);
        table.assign(&line_color("high", 5, LIGHT_BLUE), ["a"]);

        let base = AnnotationStyle::unselected();
        let resolved = table.resolve(&base, &"a");
        assert_eq!(resolved.line.stroke_color, LIGHT_BLUE);
        // The losing override must not leak in.
        assert_eq!(resolved.label.fill_color, base.label.fill_color);
    }

    #[test]
    fn resolve_is_stable_and_defaults_to_base() {
        let mut table: StyleTable<usize> = StyleTable::new();
        table.assign(&line_color("hl", 2, RED), [0]);
        let base = AnnotationStyle::selected();

        assert_eq!(table.resolve(&base, &0), table.resolve(&base, &0));
        assert_eq!(table.resolve(&base, &7), base);
    }

    #[test]
    fn removal_by_name_and_target() {
        let mut table: StyleTable<&str> = StyleTable::new();
        table.assign(&click(), ["a"]);
        table.assign(&line_color("hover", 0, RED), ["a", "b"]);

        table.remove_by_name("hover");
        assert!(!table.has_style(&"b", "hover"));
        assert!(table.has_style(&"a", "click"));

        table.remove_targets(&["a"]);
        assert!(table.is_empty());
    }

    #[test]
    fn reassigning_same_name_replaces() {
        let mut table: StyleTable<&str> = StyleTable::new();
        table.assign(&line_color("hover", 0, RED), ["a"]);
        table.assign(&line_color("hover", 0, LIGHT_BLUE), ["a"]);
        let resolved = table.resolve(&AnnotationStyle::unselected(), &"a");
        assert_eq!(resolved.line.stroke_color, LIGHT_BLUE);
    }
}
