use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub sector: Srgba<f64>,
    pub hovered: Srgba<f64>,
    pub expanded: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub orbit: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            sector: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 0.6),
                Some(0.6),
            ),
            hovered: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.9),
                Some(0.9),
            ),
            expanded: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.3, 0.3, 0.6, 0.7),
                Some(0.55),
            ),
            hub: Self::lookup_color(
                context,
                "accent_bg_color",
                Srgba::new(0.9, 0.15, 0.15, 0.95),
                Some(0.95),
            ),
            orbit: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.8, 0.8, 0.8, 0.25),
                Some(0.25),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    alpha_override.unwrap_or(c.alpha() as f64),
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.orbit-window, .orbit-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
