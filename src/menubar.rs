use std::io::Write;

use crossterm::{queue, style};

use crate::config::{KeyBindings, display_binding};
use crate::engine::garden::Garden;

/// Print a menu item string, bolding any text inside `[...]` brackets.
/// Text outside brackets is printed dim.
pub fn print_menu_item(out: &mut impl Write, item: &str) -> anyhow::Result<()> {
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            queue!(
                out,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(rest),
                style::SetAttribute(style::Attribute::Reset),
            )?;
            break;
        };
        if open > 0 {
            queue!(
                out,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(&rest[..open]),
                style::SetAttribute(style::Attribute::Reset),
            )?;
        }
        rest = &rest[open..];
        match rest.find(']') {
            Some(close) => {
                queue!(
                    out,
                    style::SetAttribute(style::Attribute::Bold),
                    style::Print(&rest[..=close]),
                    style::SetAttribute(style::Attribute::Reset),
                )?;
                rest = &rest[close + 1..];
            }
            None => {
                queue!(out, style::Print(rest))?;
                break;
            }
        }
    }
    Ok(())
}

/// Menu items that make sense in the garden's current mode.
pub fn items(garden: &Garden, keys: &KeyBindings) -> Vec<String> {
    let k = |binding: &str| display_binding(binding);
    let mut items = Vec::new();
    if garden.is_welcome() {
        items.push(format!("[{}] start", k(&keys.start)));
    } else if garden.is_bouquet() {
        items.push(format!("[{}] start over", k(&keys.reset)));
        items.push(format!("[{}] save image", k(&keys.export)));
    } else {
        items.push("[click] plant".to_string());
        items.push(format!("[1-5/{}] variety", k(&keys.next_variety)));
        if !garden.flowers().is_empty() {
            items.push(format!("[{}] wrap", k(&keys.wrap)));
            items.push(format!("[{}] reset", k(&keys.reset)));
        }
        items.push(format!("[{}] save image", k(&keys.export)));
    }
    items.push(format!("[{}] fullscreen", k(&keys.fullscreen)));
    items.push(format!("[{}] quit", k(&keys.quit)));
    items
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::types::{Point, Viewport};

    #[test]
    fn brackets_are_bold_and_the_rest_dim() {
        let mut out = Vec::new();
        print_menu_item(&mut out, "[W] wrap").unwrap();
        let text = String::from_utf8(out).unwrap();
        let bold = text.find("[W]").unwrap();
        let dim = text.find(" wrap").unwrap();
        assert!(bold < dim);
        assert!(text.contains("\x1b[1m"));
        assert!(text.contains("\x1b[2m"));
    }

    #[test]
    fn unclosed_bracket_is_printed_verbatim() {
        let mut out = Vec::new();
        print_menu_item(&mut out, "a [b").unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("[b"));
    }

    #[test]
    fn items_follow_the_mode() {
        let keys = KeyBindings::default();
        let mut g = Garden::new(Viewport::new(800.0, 600.0));
        assert_eq!(items(&g, &keys)[0], "[Enter] start");

        g.dismiss_welcome();
        let empty = items(&g, &keys).join(" ");
        assert!(empty.contains("[click] plant"));
        assert!(!empty.contains("wrap"));

        let mut rng = StdRng::seed_from_u64(1);
        g.plant(Point::new(10.0, 10.0), &mut rng);
        assert!(items(&g, &keys).join(" ").contains("[W] wrap"));

        g.begin_bouquet();
        let wrapped = items(&g, &keys).join(" ");
        assert!(wrapped.contains("[R] start over"));
        assert!(!wrapped.contains("plant"));
    }
}
