//! Open/closed and group-expansion state of one menu instance.
//!
//! Ring 1 holds the top-level items and is shown whenever the menu is open.
//! Ring 2 holds the children of at most one expanded group.

use crate::item::{self, ItemId, LinkTarget, MenuItem};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisclosureState {
    #[default]
    Closed,
    OpenCollapsed,
    OpenExpanded(ItemId),
}

impl DisclosureState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn active_group(&self) -> Option<&ItemId> {
        match self {
            Self::OpenExpanded(id) => Some(id),
            _ => None,
        }
    }
}

/// Work the caller has to carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenTarget(LinkTarget),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transition {
    pub changed: bool,
    pub effect: Option<Effect>,
}

impl Transition {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed() -> Self {
        Self {
            changed: true,
            effect: None,
        }
    }

    fn emit(effect: Effect) -> Self {
        Self {
            changed: false,
            effect: Some(effect),
        }
    }
}

/// A user intent, as produced by the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Toggle,
    SelectGroup(ItemId),
    SelectLeaf(MenuItem),
    Dismiss,
}

#[derive(Debug, Default)]
pub struct Disclosure {
    state: DisclosureState,
}

impl Disclosure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DisclosureState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn active_group(&self) -> Option<&ItemId> {
        self.state.active_group()
    }

    pub fn apply(&mut self, intent: Intent, items: &[MenuItem]) -> Transition {
        match intent {
            Intent::Toggle => self.toggle_open(),
            Intent::SelectGroup(id) => self.select_group(items, &id),
            Intent::SelectLeaf(item) => self.select_leaf(&item),
            Intent::Dismiss => self.dismiss(),
        }
    }

    /// Opening always starts collapsed; closing always forgets the group.
    pub fn toggle_open(&mut self) -> Transition {
        let next = if self.state.is_open() {
            DisclosureState::Closed
        } else {
            DisclosureState::OpenCollapsed
        };
        self.set(next)
    }

    /// Expands `id`, collapses it when it is already expanded, or switches
    /// straight over from another group. Ids that are not a top-level group
    /// with children are ignored.
    pub fn select_group(&mut self, items: &[MenuItem], id: &ItemId) -> Transition {
        if !self.state.is_open() {
            return Transition::unchanged();
        }
        if item::find_group(items, id).is_none() {
            log::debug!("Ignoring selection of '{}': not an expandable group", id);
            return Transition::unchanged();
        }

        let next = if self.state.active_group() == Some(id) {
            DisclosureState::OpenCollapsed
        } else {
            DisclosureState::OpenExpanded(id.clone())
        };
        self.set(next)
    }

    /// Leaves never change disclosure; they only ask for their target to be
    /// opened.
    pub fn select_leaf(&self, item: &MenuItem) -> Transition {
        if !self.state.is_open() || item.is_group() {
            return Transition::unchanged();
        }
        match &item.target {
            Some(target) => Transition::emit(Effect::OpenTarget(target.clone())),
            None => Transition::unchanged(),
        }
    }

    pub fn dismiss(&mut self) -> Transition {
        self.set(DisclosureState::Closed)
    }

    pub fn visible_ring1<'a>(&self, items: &'a [MenuItem]) -> &'a [MenuItem] {
        if self.state.is_open() { items } else { &[] }
    }

    /// Children of the expanded group. An id that no longer resolves yields an
    /// empty ring; the state itself is left alone until the next transition.
    pub fn visible_ring2<'a>(&self, items: &'a [MenuItem]) -> &'a [MenuItem] {
        self.state
            .active_group()
            .and_then(|id| item::find_group(items, id))
            .map(|group| group.children.as_slice())
            .unwrap_or_default()
    }

    fn set(&mut self, next: DisclosureState) -> Transition {
        if self.state == next {
            return Transition::unchanged();
        }
        log::debug!("Disclosure {:?} -> {:?}", self.state, next);
        self.state = next;
        Transition::changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar::sector_span;

    fn sample() -> Vec<MenuItem> {
        vec![
            MenuItem::group(
                "a",
                "A",
                vec![
                    MenuItem::leaf("a1", "A1", "https://a1.example"),
                    MenuItem::leaf("a2", "A2", "https://a2.example"),
                ],
            ),
            MenuItem::group("b", "B", Vec::new()),
            MenuItem::group("c", "C", vec![MenuItem::leaf("c1", "C1", "https://c1.example")]),
        ]
    }

    fn id(s: &str) -> ItemId {
        ItemId::from(s)
    }

    fn opened() -> Disclosure {
        let mut d = Disclosure::new();
        d.toggle_open();
        d
    }

    #[test]
    fn starts_closed() {
        let d = Disclosure::new();
        assert_eq!(d.state(), &DisclosureState::Closed);
        assert!(!d.is_open());
        assert_eq!(d.active_group(), None);
        assert!(d.visible_ring1(&sample()).is_empty());
    }

    #[test]
    fn toggle_twice_returns_to_closed() {
        let mut d = Disclosure::new();
        assert!(d.toggle_open().changed);
        assert_eq!(d.state(), &DisclosureState::OpenCollapsed);
        assert!(d.toggle_open().changed);
        assert_eq!(d.state(), &DisclosureState::Closed);
        assert_eq!(d.active_group(), None);
    }

    #[test]
    fn closing_clears_the_group_and_reopening_starts_collapsed() {
        let items = sample();
        let mut d = opened();
        d.select_group(&items, &id("a"));
        d.toggle_open();
        assert_eq!(d.state(), &DisclosureState::Closed);
        d.toggle_open();
        assert_eq!(d.state(), &DisclosureState::OpenCollapsed);
    }

    #[test]
    fn reselecting_the_active_group_collapses_it() {
        let items = sample();
        let mut d = opened();
        d.select_group(&items, &id("a"));
        assert_eq!(d.state(), &DisclosureState::OpenExpanded(id("a")));
        assert!(d.select_group(&items, &id("a")).changed);
        assert_eq!(d.state(), &DisclosureState::OpenCollapsed);
    }

    #[test]
    fn switching_groups_skips_the_collapsed_state() {
        let items = sample();
        let mut d = opened();
        d.select_group(&items, &id("a"));
        let t = d.select_group(&items, &id("c"));
        assert!(t.changed);
        assert_eq!(d.state(), &DisclosureState::OpenExpanded(id("c")));
        assert_eq!(d.visible_ring2(&items)[0].id, id("c1"));
    }

    #[test]
    fn empty_or_unknown_groups_are_ignored() {
        let items = sample();
        let mut d = opened();
        let before = d.state().clone();

        assert_eq!(d.select_group(&items, &id("b")), Transition::default());
        assert_eq!(d.select_group(&items, &id("a1")), Transition::default());
        assert_eq!(d.select_group(&items, &id("zzz")), Transition::default());
        assert_eq!(d.state(), &before);

        d.select_group(&items, &id("a"));
        let expanded = d.state().clone();
        d.select_group(&items, &id("b"));
        assert_eq!(d.state(), &expanded);
    }

    #[test]
    fn nothing_but_toggle_works_while_closed() {
        let items = sample();
        let mut d = Disclosure::new();
        assert!(!d.select_group(&items, &id("a")).changed);
        assert_eq!(d.select_leaf(&items[0].children[0]).effect, None);
        assert!(!d.dismiss().changed);
        assert_eq!(d.state(), &DisclosureState::Closed);
    }

    #[test]
    fn leaves_emit_their_target_without_changing_state() {
        let items = sample();
        let mut d = opened();
        d.select_group(&items, &id("a"));
        let before = d.state().clone();

        let t = d.select_leaf(&items[0].children[1]);

        assert!(!t.changed);
        assert_eq!(
            t.effect,
            Some(Effect::OpenTarget(LinkTarget::from("https://a2.example")))
        );
        assert_eq!(d.state(), &before);
    }

    #[test]
    fn groups_and_targetless_items_emit_nothing() {
        let items = sample();
        let d = opened();
        assert_eq!(d.select_leaf(&items[0]), Transition::default());
        assert_eq!(d.select_leaf(&items[1]), Transition::default());
    }

    #[test]
    fn dismiss_closes_from_any_open_state() {
        let items = sample();
        let mut d = opened();
        assert!(d.dismiss().changed);
        assert_eq!(d.state(), &DisclosureState::Closed);

        let mut d = opened();
        d.select_group(&items, &id("c"));
        assert!(d.dismiss().changed);
        assert_eq!(d.state(), &DisclosureState::Closed);
        assert_eq!(d.active_group(), None);
    }

    #[test]
    fn stale_group_renders_nothing_until_next_transition() {
        let mut items = sample();
        let mut d = opened();
        d.select_group(&items, &id("a"));

        items.remove(0);

        // the id is kept, but ring 2 is empty
        assert_eq!(d.active_group(), Some(&id("a")));
        assert!(d.visible_ring2(&items).is_empty());
        assert_eq!(d.visible_ring1(&items).len(), 2);

        d.select_group(&items, &id("c"));
        assert_eq!(d.state(), &DisclosureState::OpenExpanded(id("c")));
    }

    #[test]
    fn apply_dispatches_intents() {
        let items = sample();
        let mut d = Disclosure::new();
        d.apply(Intent::Toggle, &items);
        d.apply(Intent::SelectGroup(id("a")), &items);
        assert_eq!(d.active_group(), Some(&id("a")));

        let t = d.apply(Intent::SelectLeaf(items[0].children[0].clone()), &items);
        assert_eq!(
            t.effect,
            Some(Effect::OpenTarget(LinkTarget::from("https://a1.example")))
        );

        d.apply(Intent::Dismiss, &items);
        assert!(!d.is_open());
    }

    #[test]
    fn end_to_end_scenario() {
        let items = vec![
            MenuItem::group(
                "a",
                "A",
                vec![MenuItem::leaf("a1", "A1", "u1"), MenuItem::leaf("a2", "A2", "u2")],
            ),
            MenuItem::group("b", "B", Vec::new()),
        ];
        let gap = 2.0;
        let mut d = Disclosure::new();

        d.toggle_open();
        assert_eq!(d.state(), &DisclosureState::OpenCollapsed);
        assert_eq!(d.visible_ring1(&items).len(), 2);
        assert!(d.visible_ring2(&items).is_empty());

        let before = d.state().clone();
        d.select_group(&items, &id("b"));
        assert_eq!(d.state(), &before);

        d.select_group(&items, &id("a"));
        assert_eq!(d.state(), &DisclosureState::OpenExpanded(id("a")));
        let ring2 = d.visible_ring2(&items);
        let ring2_ids: Vec<_> = ring2.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ring2_ids, ["a1", "a2"]);
        for index in 0..ring2.len() {
            let span = sector_span(index, ring2.len(), gap);
            assert!((span.width() - (180.0 - gap)).abs() < 1e-9);
        }

        d.dismiss();
        assert_eq!(d.state(), &DisclosureState::Closed);
        assert_eq!(d.active_group(), None);
    }
}
