use ranking_core::{Category, LoadPhase, LoadState, Product};

pub fn render(view: &LoadState) -> String {
    let mut lines = Vec::new();

    lines.push(match view.last_updated_label() {
        Some(label) => format!("ROOM Rank  (更新: {label})"),
        None => "ROOM Rank".to_string(),
    });
    lines.push(render_tabs(view.current_category));
    lines.push(String::new());

    if view.is_loading {
        lines.push(format!(
            "Loading {} ranking...",
            view.current_category.label()
        ));
        return lines.join("\n");
    }

    if view.phase == LoadPhase::Failed {
        if let Some(error) = view.last_error {
            lines.push(format!("! Update failed ({error}); showing previous results"));
        }
    }

    if view.products.is_empty() {
        if view.phase == LoadPhase::Ready {
            lines.push("No ranked items for this category.".to_string());
        }
    } else {
        lines.extend(view.products.iter().map(format_product_row));
    }

    lines.join("\n")
}

/// Registry listing for the `list` command.
pub fn render_registry() -> String {
    Category::ALL_CATEGORIES
        .iter()
        .map(|category| {
            format!(
                "  {slug:<12} {id:>6}  {label}",
                slug = category.slug(),
                id = category.genre_id(),
                label = category.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_help() -> String {
    [
        "Commands:",
        "  <category>   switch category (slug or genre id, see `list`)",
        "  r, refresh   reload the current category",
        "  l, list      show categories",
        "  q, quit      exit",
    ]
    .join("\n")
}

fn render_tabs(current: Category) -> String {
    Category::ALL_CATEGORIES
        .iter()
        .map(|category| {
            if *category == current {
                format!("[{}]", category.label())
            } else {
                category.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_product_row(product: &Product) -> String {
    format!(
        "#{rank:>2} {name}\n    ¥{price}  {shop}\n    {link}",
        rank = product.rank,
        name = product.name,
        price = format_with_commas(product.price),
        shop = product.shop_name,
        link = product.affiliate_url
    )
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::{format_with_commas, render, render_registry};
    use ranking_core::{Category, ErrorKind, LoadPhase, LoadState, Product};

    fn product(rank: u32, price: u64) -> Product {
        Product {
            rank,
            name: format!("item {rank}"),
            item_url: format!("https://item/{rank}"),
            price,
            image_urls: Vec::new(),
            shop_name: "Shop".to_string(),
            affiliate_url: format!("https://aff/{rank}"),
        }
    }

    #[test]
    fn commas_group_thousands() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(980), "980");
        assert_eq!(format_with_commas(1980), "1,980");
        assert_eq!(format_with_commas(1234567), "1,234,567");
    }

    #[test]
    fn loading_hides_rows_and_marks_tab() {
        let view = LoadState {
            current_category: Category::Food,
            products: vec![product(1, 100)],
            is_loading: true,
            phase: LoadPhase::Loading,
            ..LoadState::default()
        };
        let text = render(&view);
        assert!(text.contains("[食品]"));
        assert!(text.contains("Loading 食品 ranking..."));
        assert!(!text.contains("item 1"));
    }

    #[test]
    fn failure_keeps_rows_with_notice() {
        let view = LoadState {
            current_category: Category::Food,
            products: vec![product(1, 2980), product(2, 500)],
            phase: LoadPhase::Failed,
            last_error: Some(ErrorKind::Network),
            ..LoadState::default()
        };
        let text = render(&view);
        assert!(text.contains("Update failed (network error)"));
        assert!(text.contains("# 1 item 1"));
        assert!(text.contains("¥2,980  Shop"));
        assert!(text.contains("https://aff/2"));
    }

    #[test]
    fn empty_ready_ranking_says_so() {
        let view = LoadState {
            phase: LoadPhase::Ready,
            ..LoadState::default()
        };
        assert!(render(&view).contains("No ranked items"));
        assert!(!render(&LoadState::default()).contains("No ranked items"));
    }

    #[test]
    fn registry_lists_every_category() {
        let listing = render_registry();
        assert_eq!(listing.lines().count(), Category::ALL_CATEGORIES.len());
        assert!(listing.contains("daily_goods"));
        assert!(listing.contains("215783"));
    }
}
