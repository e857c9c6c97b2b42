use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgb, Srgba};

/// The seven default sector colors, cycled when the wheel has more items:
/// blue, green, yellow, orange, red, purple, pink.
pub fn default_palette() -> Vec<Srgba<f64>> {
    vec![
        Srgba::new(0.0, 0.478, 1.0, 1.0),
        Srgba::new(0.204, 0.78, 0.349, 1.0),
        Srgba::new(1.0, 0.8, 0.0, 1.0),
        Srgba::new(1.0, 0.584, 0.0, 1.0),
        Srgba::new(1.0, 0.231, 0.188, 1.0),
        Srgba::new(0.686, 0.322, 0.871, 1.0),
        Srgba::new(1.0, 0.176, 0.333, 1.0),
    ]
}

/// Parses a `#rrggbb` / `rgb` hex color. Opaque; the wheel has no use for
/// translucent sectors.
pub fn parse_color(spec: &str) -> Option<Srgba<f64>> {
    let rgb: Srgb<u8> = spec.trim().trim_start_matches('#').parse().ok()?;
    let rgb: Srgb<f64> = rgb.into_format();
    Some(Srgba::new(rgb.red, rgb.green, rgb.blue, 1.0))
}

/// Configured palette, or `None` when nothing usable was given. Unparseable
/// entries are skipped with a warning rather than failing the whole list.
pub fn parse_palette(specs: &[String]) -> Option<Vec<Srgba<f64>>> {
    let palette: Vec<Srgba<f64>> = specs
        .iter()
        .filter_map(|spec| {
            let color = parse_color(spec);
            if color.is_none() {
                log::warn!("Ignoring unparseable color '{}'", spec);
            }
            color
        })
        .collect();
    (!palette.is_empty()).then_some(palette)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.spinwheel-window, .spinwheel-area {
    background-color: #1e1e1e;
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_palette_has_seven_colors() {
        assert_eq!(default_palette().len(), 7);
    }

    #[test]
    fn hex_colors_parse() {
        let red = parse_color("#ff0000").unwrap();
        assert_abs_diff_eq!(red.red, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(red.green, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(red.alpha, 1.0, epsilon = 1e-9);
        assert!(parse_color("336699").is_some());
        assert!(parse_color("not-a-color").is_none());
    }

    #[test]
    fn bad_entries_are_skipped_not_fatal() {
        let specs = vec!["#ffffff".to_string(), "nope".to_string()];
        assert_eq!(parse_palette(&specs).unwrap().len(), 1);
        assert!(parse_palette(&["garbage".to_string()]).is_none());
        assert!(parse_palette(&[]).is_none());
    }
}
