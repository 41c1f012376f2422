use crate::config::{Config, LayoutConfig};
use crate::gui::menu::{
    ICON_SIZE, INNER_ORBIT_RADIUS, ORBITAL_VIEWPORT_HEIGHT, OUTER_ORBIT_RADIUS, PLANET_RADIUS,
    REFERENCE_HEIGHT, SUN_RADIUS,
};
use gdk_pixbuf::Pixbuf;
use orbit_core::orbit::{self, Camera, Projected, Vec3};
use orbit_core::{Disclosure, Intent, MenuItem, Point, Presentation, RingLayout, Transition};
use orbit_core::{icon, polar};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    Inner,
    Outer,
}

impl Ring {
    pub const ALL: [Ring; 2] = [Ring::Inner, Ring::Outer];
}

/// What lies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Hub,
    Item(Ring, usize),
    Backdrop,
}

/// An item of the orbital scene, projected to the screen.
pub struct Body<'a> {
    pub ring: Ring,
    pub index: usize,
    pub item: &'a MenuItem,
    pub projected: Projected,
}

pub struct Menu {
    pub items: Vec<MenuItem>,
    pub disclosure: Disclosure,
    pub layout: LayoutConfig,
    pub presentation: Presentation,
    pub camera: Camera,
    pub center: Point,
    pub scale_factor: f64,
    pub hover: Option<(Ring, usize)>,
    icons: HashMap<PathBuf, Pixbuf>,
}

impl Menu {
    pub fn new(config: &Config) -> Self {
        Self {
            items: config.items.clone(),
            disclosure: Disclosure::new(),
            layout: config.layout,
            presentation: config.presentation,
            camera: Camera::default(),
            center: Point::default(),
            scale_factor: 1.0,
            hover: None,
            icons: HashMap::new(),
        }
    }

    /// Swaps in a reloaded config. Disclosure survives the reload, so an
    /// expanded group that vanished simply shows an empty second ring.
    pub fn apply_config(&mut self, config: &Config) {
        self.items = config.items.clone();
        self.layout = config.layout;
        self.presentation = config.presentation;
        self.hover = None;
    }

    pub fn load_icons(&mut self) {
        let mut icons = HashMap::new();
        let all = self
            .items
            .iter()
            .flat_map(|item| std::iter::once(item).chain(item.children.iter()));

        for item in all {
            if let Some(path) = icon::resolve(item.icon.as_ref())
                && !icons.contains_key(&path)
            {
                match Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true) {
                    Ok(pixbuf) => {
                        icons.insert(path, pixbuf);
                    }
                    Err(e) => log::warn!("Failed to load icon {}: {}", path.display(), e),
                }
            }
        }
        self.icons = icons;
    }

    pub fn icon_for(&self, item: &MenuItem) -> Option<&Pixbuf> {
        icon::resolve(item.icon.as_ref()).and_then(|path| self.icons.get(&path))
    }

    pub fn refresh(&mut self, center: Point, monitor_height: f64) {
        self.center = center;
        self.hover = None;
        self.scale_factor = monitor_height / REFERENCE_HEIGHT;
    }

    pub fn open(&mut self) -> Transition {
        if self.disclosure.is_open() {
            Transition::default()
        } else {
            self.disclosure.toggle_open()
        }
    }

    pub fn hub_radius(&self) -> f64 {
        self.layout.hub_radius * self.scale_factor
    }

    pub fn ring_layout(&self, ring: Ring) -> RingLayout {
        let layout = match ring {
            Ring::Inner => self.layout.ring1,
            Ring::Outer => self.layout.ring2,
        };
        layout.scaled(self.scale_factor)
    }

    pub fn ring_items(&self, ring: Ring) -> &[MenuItem] {
        match ring {
            Ring::Inner => self.disclosure.visible_ring1(&self.items),
            Ring::Outer => self.disclosure.visible_ring2(&self.items),
        }
    }

    pub fn is_hovered(&self, ring: Ring, index: usize) -> bool {
        self.hover == Some((ring, index))
    }

    pub fn is_expanded(&self, item: &MenuItem) -> bool {
        self.disclosure.active_group() == Some(&item.id)
    }

    pub fn hit(&self, pointer: Point) -> Hit {
        let rel = pointer.relative_to(self.center);
        match self.presentation {
            Presentation::Flat => self.hit_flat(rel),
            Presentation::Orbital => self.hit_orbital(rel),
        }
    }

    fn hit_flat(&self, rel: Point) -> Hit {
        let radius = rel.radius();
        if radius <= self.hub_radius() {
            return Hit::Hub;
        }

        let angle = polar::angle_of(rel);
        Ring::ALL
            .into_iter()
            .find_map(|ring| {
                let items = self.ring_items(ring);
                let layout = self.ring_layout(ring);
                if items.is_empty() || !layout.contains(radius) {
                    return None;
                }
                let index = polar::sector_at(angle, items.len());
                // the gap between two sectors is backdrop, like the gap between rings
                layout
                    .span(index, items.len())
                    .contains(angle)
                    .then_some(Hit::Item(ring, index))
            })
            .unwrap_or(Hit::Backdrop)
    }

    fn hit_orbital(&self, rel: Point) -> Hit {
        let bodies = self.bodies();
        let projected: Vec<_> = bodies.iter().map(|b| b.projected).collect();
        let picked = orbit::pick(&projected, rel, PLANET_RADIUS).map(|i| &bodies[i]);
        let sun = self
            .sun()
            .filter(|s| rel.distance(s.screen) <= SUN_RADIUS * s.scale);

        match (picked, sun) {
            (Some(body), Some(sun)) if body.projected.depth > sun.depth => Hit::Hub,
            (Some(body), _) => Hit::Item(body.ring, body.index),
            (None, Some(_)) => Hit::Hub,
            (None, None) => Hit::Backdrop,
        }
    }

    pub fn intent_for(&self, hit: Hit) -> Option<Intent> {
        let open = self.disclosure.is_open();
        match hit {
            Hit::Hub if open => Some(Intent::Dismiss),
            Hit::Hub => Some(Intent::Toggle),
            Hit::Backdrop => open.then_some(Intent::Dismiss),
            Hit::Item(ring, index) => {
                let item = self.ring_items(ring).get(index)?;
                let group_like = item.is_group() || item.target.is_none();
                Some(if ring == Ring::Inner && group_like {
                    Intent::SelectGroup(item.id.clone())
                } else {
                    Intent::SelectLeaf(item.clone())
                })
            }
        }
    }

    pub fn click(&mut self, pointer: Point) -> Transition {
        let Some(intent) = self.intent_for(self.hit(pointer)) else {
            return Transition::default();
        };
        let transition = self.disclosure.apply(intent, &self.items);
        if transition.changed {
            self.hover = None;
        }
        transition
    }

    /// Returns whether the hover target changed.
    pub fn update_cursor(&mut self, pointer: Point) -> bool {
        let hovered = match self.hit(pointer) {
            Hit::Item(ring, index) => Some((ring, index)),
            Hit::Hub | Hit::Backdrop => None,
        };
        let changed = self.hover != hovered;
        self.hover = hovered;
        changed
    }

    fn viewport_height(&self) -> f64 {
        ORBITAL_VIEWPORT_HEIGHT * self.scale_factor
    }

    pub fn orbit_radius(ring: Ring) -> f64 {
        match ring {
            Ring::Inner => INNER_ORBIT_RADIUS,
            Ring::Outer => OUTER_ORBIT_RADIUS,
        }
    }

    pub fn project(&self, point: Vec3) -> Option<Projected> {
        self.camera.project(point, self.viewport_height())
    }

    pub fn sun(&self) -> Option<Projected> {
        self.project(Vec3::ZERO)
    }

    /// Visible items of both rings placed on their orbits.
    pub fn bodies(&self) -> Vec<Body<'_>> {
        Ring::ALL
            .into_iter()
            .flat_map(|ring| {
                let items = self.ring_items(ring);
                let radius = Self::orbit_radius(ring);
                items.iter().enumerate().filter_map(move |(index, item)| {
                    self.project(orbit::orbit_position(index, items.len(), radius))
                        .map(|projected| Body {
                            ring,
                            index,
                            item,
                            projected,
                        })
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use orbit_core::polar::polar_to_cartesian;
    use orbit_core::{DisclosureState, Effect, ItemId, LinkTarget};

    fn menu() -> Menu {
        let config = parse_config(
            r#"
            [[items]]
            id = "a"
            label = "A"

            [[items.children]]
            id = "a1"
            label = "A1"
            url = "https://a1.example"

            [[items.children]]
            id = "a2"
            label = "A2"
            url = "https://a2.example"

            [[items]]
            id = "w"
            label = "W"
            url = "https://w.example"

            [[items]]
            id = "b"
            label = "B"
            "#,
        )
        .unwrap();
        Menu::new(&config)
    }

    fn in_sector(ring: RingLayout, index: usize, total: usize) -> Point {
        ring.centroid(ring.span(index, total))
    }

    #[test]
    fn hub_click_opens_then_dismisses() {
        let mut menu = menu();
        assert!(menu.click(Point::new(5.0, 5.0)).changed);
        assert_eq!(menu.disclosure.state(), &DisclosureState::OpenCollapsed);

        assert!(menu.click(Point::new(0.0, 0.0)).changed);
        assert_eq!(menu.disclosure.state(), &DisclosureState::Closed);
    }

    #[test]
    fn closed_menu_only_has_a_hub() {
        let menu = menu();
        let ring1 = menu.ring_layout(Ring::Inner);
        assert_eq!(menu.hit(in_sector(ring1, 0, 3)), Hit::Backdrop);
        assert_eq!(menu.intent_for(Hit::Backdrop), None);
    }

    #[test]
    fn flat_clicks_expand_groups_and_open_leaves() {
        let mut menu = menu();
        menu.open();
        let ring1 = menu.ring_layout(Ring::Inner);

        assert_eq!(menu.hit(in_sector(ring1, 0, 3)), Hit::Item(Ring::Inner, 0));
        menu.click(in_sector(ring1, 0, 3));
        assert_eq!(
            menu.disclosure.state(),
            &DisclosureState::OpenExpanded(ItemId::from("a"))
        );

        let ring2 = menu.ring_layout(Ring::Outer);
        let t = menu.click(in_sector(ring2, 1, 2));
        assert_eq!(
            t.effect,
            Some(Effect::OpenTarget(LinkTarget::from("https://a2.example")))
        );

        let t = menu.click(in_sector(ring1, 1, 3));
        assert_eq!(
            t.effect,
            Some(Effect::OpenTarget(LinkTarget::from("https://w.example")))
        );
        assert!(menu.disclosure.is_open());
    }

    #[test]
    fn empty_group_and_backdrop() {
        let mut menu = menu();
        menu.open();
        let ring1 = menu.ring_layout(Ring::Inner);

        let t = menu.click(in_sector(ring1, 2, 3));
        assert_eq!(t, Transition::default());
        assert_eq!(menu.disclosure.state(), &DisclosureState::OpenCollapsed);

        assert!(menu.click(polar_to_cartesian(1000.0, 45.0)).changed);
        assert!(!menu.disclosure.is_open());
    }

    #[test]
    fn clicks_in_the_gap_between_sectors_hit_the_backdrop() {
        let mut menu = menu();
        menu.open();
        let ring1 = menu.ring_layout(Ring::Inner);
        let mid_radius = (ring1.inner + ring1.outer) / 2.0;

        // ring 1 has three sectors and a 2° gap, so 120° lies in a gap
        assert_eq!(
            menu.hit(polar_to_cartesian(mid_radius, 120.0)),
            Hit::Backdrop
        );
        assert_eq!(
            menu.hit(polar_to_cartesian(mid_radius, 121.5)),
            Hit::Item(Ring::Inner, 1)
        );
        assert_eq!(
            menu.hit(polar_to_cartesian(mid_radius, 0.5)),
            Hit::Backdrop
        );

        assert!(menu.click(polar_to_cartesian(mid_radius, 240.0)).changed);
        assert!(!menu.disclosure.is_open());
    }

    #[test]
    fn hover_follows_the_pointer() {
        let mut menu = menu();
        menu.open();
        let ring1 = menu.ring_layout(Ring::Inner);

        assert!(menu.update_cursor(in_sector(ring1, 1, 3)));
        assert!(menu.is_hovered(Ring::Inner, 1));
        assert!(!menu.update_cursor(in_sector(ring1, 1, 3)));
        assert!(menu.update_cursor(Point::default()));
        assert_eq!(menu.hover, None);
    }

    #[test]
    fn hit_testing_is_relative_to_the_hub_and_scaled() {
        let mut menu = menu();
        menu.open();
        menu.refresh(Point::new(500.0, 400.0), 720.0);

        assert_eq!(menu.hub_radius(), 20.0);
        assert_eq!(menu.hit(Point::new(510.0, 400.0)), Hit::Hub);

        let ring1 = menu.ring_layout(Ring::Inner);
        let p = in_sector(ring1, 1, 3).offset(menu.center);
        assert_eq!(menu.hit(p), Hit::Item(Ring::Inner, 1));
    }

    #[test]
    fn stale_group_after_reload_shows_no_second_ring() {
        let mut menu = menu();
        menu.open();
        let ring1 = menu.ring_layout(Ring::Inner);
        menu.click(in_sector(ring1, 0, 3));

        let reloaded = parse_config("[[items]]\nlabel = \"Only\"\nurl = \"x\"").unwrap();
        menu.apply_config(&reloaded);

        assert_eq!(menu.disclosure.active_group(), Some(&ItemId::from("a")));
        assert!(menu.ring_items(Ring::Outer).is_empty());
    }

    #[test]
    fn orbital_clicks_pick_planets() {
        let mut menu = menu();
        menu.presentation = Presentation::Orbital;

        assert_eq!(menu.hit(Point::default()), Hit::Hub);
        menu.click(Point::default());
        assert!(menu.disclosure.is_open());

        let bodies = menu.bodies();
        assert_eq!(bodies.len(), 3);
        let target = bodies
            .iter()
            .find(|b| b.ring == Ring::Inner && b.index == 0)
            .map(|b| b.projected.screen)
            .unwrap();

        menu.click(target);
        assert_eq!(
            menu.disclosure.state(),
            &DisclosureState::OpenExpanded(ItemId::from("a"))
        );
        assert_eq!(menu.bodies().len(), 5);
    }
}
