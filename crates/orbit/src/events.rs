use orbit_core::Presentation;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Toggle,
    Present(Presentation),
    ConfigReload,
}
