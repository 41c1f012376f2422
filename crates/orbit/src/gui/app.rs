use crate::config::{self, SETTINGS_TARGET};
use crate::events::AppEvent;
use crate::gui::menu::{self, Menu, REFERENCE_HEIGHT};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use crate::sys::wm;
use anyhow::Context;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit_core::{Effect, LinkTarget, Point, Presentation, Transition, icon, launch};
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub menu: Rc<RefCell<Menu>>,
    pub opener: String,
    pub visible: bool,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Toggle,
    Present(Presentation),
    SwitchPresentation,
    Click(Point),
    CursorMove(Point),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::Present(p) => AppMsg::Present(p),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Menu, String, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Orbit"),
            #[watch]
            set_visible: model.visible,
            #[watch]
            set_opacity: if model.visible { 1.0 } else { 0.0 },
            add_css_class: "orbit-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => {
                            sender.input(AppMsg::Hide);
                            glib::Propagation::Stop
                        }
                        gtk::gdk::Key::Tab => {
                            sender.input(AppMsg::SwitchPresentation);
                            glib::Propagation::Stop
                        }
                        _ => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "orbit-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::CursorMove(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: gtk::gdk::BUTTON_PRIMARY,
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Click(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (menu, opener, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let model = AppModel {
            menu: Rc::new(RefCell::new(menu)),
            opener,
            visible: false,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let menu_draw = model.menu.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = menu::draw(cr, &menu_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.show(),
            AppMsg::Hide => self.hide(),
            AppMsg::Toggle => {
                if self.visible {
                    self.hide();
                } else {
                    self.show();
                }
            }
            AppMsg::Present(presentation) => {
                self.menu.borrow_mut().presentation = presentation;
                self.redraw();
            }
            AppMsg::SwitchPresentation => {
                let mut menu = self.menu.borrow_mut();
                menu.presentation = menu.presentation.toggled();
                menu.hover = None;
                log::debug!("Switched to {} presentation", menu.presentation);
                drop(menu);
                self.redraw();
            }
            AppMsg::Click(point) => {
                if !self.visible {
                    return;
                }
                let transition = self.menu.borrow_mut().click(point);
                self.settle(transition);
            }
            AppMsg::CursorMove(point) => {
                if self.visible && self.menu.borrow_mut().update_cursor(point) {
                    self.redraw();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    icon::clear_cache();
                    let mut menu = self.menu.borrow_mut();
                    menu.apply_config(&new_config);
                    menu.load_icons();
                    drop(menu);
                    self.opener = new_config.opener;
                    self.redraw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn show(&mut self) {
        let monitor_name = wm::get_active_monitor();
        let mut monitor_height = REFERENCE_HEIGHT;
        if let Some(name) = &monitor_name {
            window::set_window_monitor(&self.root, name);
            if let Some(m) = window::get_monitor_by_name(name) {
                monitor_height = m.geometry().height() as f64;
            }
        }

        self.visible = true;

        let cursor_pos = window::get_cursor_position(&self.root)
            .or_else(wm::get_cursor_pos_on_active_monitor)
            .unwrap_or_default();

        let mut menu = self.menu.borrow_mut();
        menu.refresh(cursor_pos, monitor_height);
        menu.open();
        drop(menu);
        self.redraw();
    }

    fn hide(&mut self) {
        self.menu.borrow_mut().disclosure.dismiss();
        self.visible = false;
    }

    fn redraw(&self) {
        self.drawing_area.queue_draw();
    }

    /// Runs the transition's effect and hides the overlay once the menu has
    /// closed.
    fn settle(&mut self, transition: Transition) {
        if let Some(effect) = transition.effect
            && let Err(e) = self.run_effect(effect)
        {
            log::error!("{:#}", e);
        }

        if !self.menu.borrow().disclosure.is_open() {
            self.visible = false;
        } else if transition.changed {
            self.redraw();
        }
    }

    fn run_effect(&self, effect: Effect) -> anyhow::Result<()> {
        let Effect::OpenTarget(target) = effect;
        let target = if target.as_str() == SETTINGS_TARGET {
            let path = config::write_default_config().context("Failed to write config")?;
            LinkTarget::new(path.to_string_lossy())
        } else {
            target
        };

        launch::open_target(&target, &self.opener)
            .with_context(|| format!("Failed to open '{}'", target))
    }
}
