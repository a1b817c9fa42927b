use super::{Choice, ChoiceSpec, Separator};
use crate::{answers::Answers, error::Result};
use serde_json::Value;

/// One slot of a [`ChoiceList`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceItem {
    Choice(Choice),
    Separator(Separator),
}

impl ChoiceItem {
    pub fn is_separator(&self) -> bool {
        matches!(self, ChoiceItem::Separator(_))
    }

    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            ChoiceItem::Choice(choice) => Some(choice),
            ChoiceItem::Separator(_) => None,
        }
    }
}

/// Ordered choices and separators of one question.
///
/// Separators occupy slots in [`items`](Self::items) but are invisible to
/// every index-based accessor: `get_choice`, `find_index` and friends count
/// selectable choices only, and [`real_len`](Self::real_len) is the length
/// navigation and numeric shortcuts work with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceList {
    items: Vec<ChoiceItem>,
    /// Slot index of every non-separator item, in order
    real: Vec<usize>,
}

impl ChoiceList {
    /// Resolves `specs` against the current answers.
    pub fn new(specs: &[ChoiceSpec], answers: &Answers) -> Result<Self> {
        let mut list = Self::default();
        for spec in specs {
            list.push(spec, answers)?;
        }
        Ok(list)
    }

    /// Appends one entry, resolving any answer-dependent field.
    pub fn push(&mut self, spec: &ChoiceSpec, answers: &Answers) -> Result<()> {
        let item = match spec {
            ChoiceSpec::Separator(separator) => ChoiceItem::Separator(separator.clone()),
            ChoiceSpec::Choice(options) => {
                let disabled = match &options.disabled {
                    Some(disabled) => disabled.resolve(answers)?.reason(),
                    None => None,
                };
                ChoiceItem::Choice(Choice {
                    name: options.name.clone(),
                    value: options
                        .value
                        .clone()
                        .unwrap_or_else(|| Value::String(options.name.clone())),
                    short: options.short.clone().unwrap_or_else(|| options.name.clone()),
                    key: options.key.clone(),
                    checked: options.checked,
                    disabled,
                })
            }
        };
        if !item.is_separator() {
            self.real.push(self.items.len());
        }
        self.items.push(item);
        Ok(())
    }

    /// Number of slots, separators included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of selectable (non-separator) entries.
    pub fn real_len(&self) -> usize {
        self.real.len()
    }

    pub fn items(&self) -> &[ChoiceItem] {
        &self.items
    }

    /// Slot lookup; separators included.
    pub fn get(&self, slot: usize) -> Option<&ChoiceItem> {
        self.items.get(slot)
    }

    /// Lookup among choices only.
    pub fn get_choice(&self, index: usize) -> Option<&Choice> {
        let slot = *self.real.get(index)?;
        self.items[slot].as_choice()
    }

    pub fn get_choice_mut(&mut self, index: usize) -> Option<&mut Choice> {
        let slot = *self.real.get(index)?;
        match &mut self.items[slot] {
            ChoiceItem::Choice(choice) => Some(choice),
            ChoiceItem::Separator(_) => None,
        }
    }

    /// Slot position of the `index`-th choice.
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        self.real.get(index).copied()
    }

    pub fn choices(&self) -> impl Iterator<Item = &Choice> {
        self.items.iter().filter_map(ChoiceItem::as_choice)
    }

    pub fn choices_mut(&mut self) -> impl Iterator<Item = &mut Choice> {
        self.items.iter_mut().filter_map(|item| match item {
            ChoiceItem::Choice(choice) => Some(choice),
            ChoiceItem::Separator(_) => None,
        })
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&Choice>
    where
        P: Fn(&Choice) -> bool,
    {
        self.choices().filter(|choice| predicate(choice)).collect()
    }

    /// First choice (not slot) index matching `predicate`.
    pub fn find_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(&Choice) -> bool,
    {
        self.choices().position(predicate)
    }

    pub fn pluck<T, F>(&self, field: F) -> Vec<T>
    where
        F: Fn(&Choice) -> T,
    {
        self.choices().map(field).collect()
    }

    /// Resolves a question default given either as a choice index or as a
    /// choice value.
    pub fn index_of_default(&self, default: &Value) -> Option<usize> {
        if let Some(index) = default.as_u64() {
            let index = usize::try_from(index).ok()?;
            if index < self.real_len() {
                return Some(index);
            }
        }
        self.find_index(|choice| &choice.value == default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::{ChoiceOptions, Disabled, Separator};
    use crate::config::Dynamic;
    use serde_json::json;

    fn sample() -> ChoiceList {
        let specs = vec![
            ChoiceSpec::from("red"),
            ChoiceSpec::separator(),
            ChoiceOptions::new("Green").with_value("g").with_key("g").into(),
            Separator::with_line("--- later ---").into(),
            ChoiceOptions::new("Blue").with_short("B").with_disabled(true).into(),
        ];
        ChoiceList::new(&specs, &Answers::new()).unwrap()
    }

    #[test]
    fn test_real_length_ignores_separators() {
        let list = sample();
        assert_eq!(list.len(), 5);
        assert_eq!(list.real_len(), 3);
        assert_eq!(list.real_len(), list.items().iter().filter(|i| !i.is_separator()).count());
    }

    #[test]
    fn test_index_lookups_skip_separators() {
        let list = sample();
        assert_eq!(list.get_choice(1).map(|c| c.name.as_str()), Some("Green"));
        assert_eq!(list.slot_of(1), Some(2));
        assert!(list.get(1).unwrap().is_separator());
        assert!(list.get_choice(3).is_none());
    }

    #[test]
    fn test_values_and_shorts_default_to_name() {
        let list = sample();
        let red = list.get_choice(0).unwrap();
        assert_eq!(red.value, json!("red"));
        assert_eq!(red.short, "red");
        assert_eq!(list.get_choice(2).unwrap().short, "B");
    }

    #[test]
    fn test_pluck_filter_and_find() {
        let list = sample();
        assert_eq!(list.pluck(|c| c.name.clone()), vec!["red", "Green", "Blue"]);
        assert_eq!(list.filter(|c| c.is_disabled()).len(), 1);
        assert_eq!(list.find_index(|c| c.value == json!("g")), Some(1));
    }

    #[test]
    fn test_defaults_by_index_or_value() {
        let list = sample();
        assert_eq!(list.index_of_default(&json!(2)), Some(2));
        assert_eq!(list.index_of_default(&json!("g")), Some(1));
        assert_eq!(list.index_of_default(&json!(9)), None);
        assert_eq!(list.index_of_default(&json!("nope")), None);
    }

    #[test]
    fn test_disabled_can_depend_on_answers() {
        let specs = vec![ChoiceSpec::from(
            ChoiceOptions::new("Deploy").with_disabled(Dynamic::computed(|answers: &Answers| {
                Ok(match answers.get("env").and_then(|v| v.as_str()) {
                    Some("prod") => Disabled::Reason("locked".into()),
                    _ => Disabled::Flag(false),
                })
            })),
        )];
        let prod = Answers::from_value(json!({"env": "prod"}));
        let dev = Answers::from_value(json!({"env": "dev"}));

        let locked = ChoiceList::new(&specs, &prod).unwrap();
        let open = ChoiceList::new(&specs, &dev).unwrap();

        assert_eq!(locked.get_choice(0).unwrap().disabled.as_deref(), Some("locked"));
        assert!(!open.get_choice(0).unwrap().is_disabled());
    }
}
