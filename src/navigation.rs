//! Moving a selection pointer through a choice list.

use crate::choice::ChoiceList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

fn selectable(choices: &ChoiceList, index: usize) -> bool {
    choices.get_choice(index).is_some_and(|choice| !choice.is_disabled())
}

/// Index of the first choice that can be selected.
pub fn first_selectable(choices: &ChoiceList) -> Option<usize> {
    (0..choices.real_len()).find(|&index| selectable(choices, index))
}

/// Next selectable index one step in `direction` from `current`.
///
/// Indices are choice indices, so separators never appear. Disabled choices
/// are stepped over. At either end the pointer wraps around when `looping`
/// is set and stays on `current` otherwise. At most `real_len` steps are
/// taken, so a list without any other selectable choice returns `current`.
pub fn increment(
    current: usize,
    direction: Direction,
    choices: &ChoiceList,
    looping: bool,
) -> usize {
    let len = choices.real_len();
    if len == 0 {
        return current;
    }

    let mut index = current.min(len - 1);
    for _ in 0..len {
        index = match direction {
            Direction::Down if index + 1 < len => index + 1,
            Direction::Up if index > 0 => index - 1,
            Direction::Down if looping => 0,
            Direction::Up if looping => len - 1,
            _ => return current,
        };
        if selectable(choices, index) {
            return index;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        answers::Answers,
        choice::{ChoiceOptions, ChoiceSpec},
    };

    fn list(entries: &[(&str, bool)]) -> ChoiceList {
        let specs: Vec<ChoiceSpec> = entries
            .iter()
            .map(|(name, disabled)| {
                if *name == "--" {
                    ChoiceSpec::separator()
                } else {
                    ChoiceOptions::new(*name).with_disabled(*disabled).into()
                }
            })
            .collect();
        ChoiceList::new(&specs, &Answers::new()).unwrap()
    }

    #[test]
    fn test_clamps_at_the_first_valid_entry_without_looping() {
        let choices = list(&[("a", true), ("b", false), ("c", false)]);
        assert_eq!(increment(1, Direction::Up, &choices, false), 1);
        assert_eq!(increment(2, Direction::Up, &choices, false), 1);
    }

    #[test]
    fn test_clamps_at_the_last_valid_entry_without_looping() {
        let choices = list(&[("a", false), ("b", false), ("c", true)]);
        assert_eq!(increment(1, Direction::Down, &choices, false), 1);
    }

    #[test]
    fn test_wraps_from_last_to_first_when_looping() {
        let choices = list(&[("a", false), ("--", false), ("b", false), ("c", false)]);
        assert_eq!(increment(2, Direction::Down, &choices, true), 0);
        assert_eq!(increment(0, Direction::Up, &choices, true), 2);
    }

    #[test]
    fn test_skips_disabled_entries() {
        let choices = list(&[("a", false), ("b", true), ("--", false), ("c", true), ("d", false)]);
        assert_eq!(increment(0, Direction::Down, &choices, false), 3);
        assert_eq!(increment(3, Direction::Up, &choices, false), 0);
    }

    #[test]
    fn test_terminates_with_a_single_selectable_entry() {
        let choices = list(&[("a", true), ("b", false), ("c", true)]);
        for direction in [Direction::Up, Direction::Down] {
            for looping in [true, false] {
                assert_eq!(increment(1, direction, &choices, looping), 1);
            }
        }
    }

    #[test]
    fn test_never_lands_on_disabled_entries() {
        let choices = list(&[("a", false), ("b", true), ("c", false), ("d", true), ("e", false)]);
        let mut index = 0;
        for _ in 0..10 {
            index = increment(index, Direction::Down, &choices, true);
            assert!(!choices.get_choice(index).unwrap().is_disabled());
        }
    }

    #[test]
    fn test_first_selectable_skips_disabled() {
        assert_eq!(first_selectable(&list(&[("a", true), ("b", false)])), Some(1));
        assert_eq!(first_selectable(&list(&[("a", true)])), None);
    }
}
