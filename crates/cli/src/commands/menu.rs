//! Menu listing command.

use std::fmt::Write as _;

use echoeats_core::menu::{self, CategoryFilter, UnknownCategory};
use echoeats_core::MenuCategory;

/// Print the menu, optionally limited to one category.
///
/// # Errors
///
/// Returns an error if the category id is not recognised.
#[allow(clippy::print_stdout)]
pub fn print(category: &str) -> Result<(), UnknownCategory> {
    let filter: CategoryFilter = category.parse()?;
    print!("{}", render(filter));
    Ok(())
}

/// Format the menu as plain text, one section per category.
fn render(filter: CategoryFilter) -> String {
    let mut out = String::new();
    for category in MenuCategory::ALL {
        if let CategoryFilter::Only(only) = filter
            && only != category
        {
            continue;
        }
        let _ = writeln!(out, "== {} ==", category.display_name());
        for item in menu::filter(CategoryFilter::Only(category)) {
            let badge = item
                .badge
                .as_deref()
                .map(|b| format!(" [{b}]"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "{:>3}  {:<28} {:>7}  {} stars  {}{badge}",
                item.id.to_string(),
                item.name,
                item.price.to_string(),
                item.rating,
                item.prep_time
            );
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_category() {
        let out = render("desserts".parse().unwrap());
        assert!(out.starts_with("== Desserts =="));
        assert!(out.contains("Gulab Jamun"));
        assert!(!out.contains("Biryani"));
    }

    #[test]
    fn test_render_all_lists_every_item() {
        let out = render(CategoryFilter::All);
        for item in menu::catalog() {
            assert!(out.contains(&item.name), "missing {}", item.name);
        }
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        assert!(print("pizza").is_err());
    }
}
