use crate::core::pricing::{find_min_tariff_price, format_price};
use crate::core::tree::ServiceTree;
use crate::core::{Hero, Service};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

pub fn render_tree(tree: &ServiceTree) -> String {
    let mut out = String::new();
    for root in tree.roots() {
        render_node(root, 0, &mut out);
    }
    out
}

fn render_node(service: &Service, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let title = if service.title.is_empty() {
        service.path.as_str()
    } else {
        service.title.as_str()
    };
    let line = match find_min_tariff_price(service) {
        Some(price) => format!("{}{} [{}] from {}\n", indent, title, service.path, format_price(price)),
        None => format!("{}{} [{}]\n", indent, title, service.path),
    };
    out.push_str(&line);
    for child in &service.children {
        render_node(child, depth + 1, out);
    }
}

pub fn render_price_list(tree: &ServiceTree) -> String {
    let mut out = String::new();
    for row in tree.services_with_tariffs() {
        out.push_str(&format!("{} [{}]\n", row.title, row.path));
        for tariff in &row.tariffs {
            let label = if tariff.duration.is_empty() {
                tariff.title.clone()
            } else {
                format!("{} ({})", tariff.title, tariff.duration)
            };
            out.push_str(&format!("  - {}: {}\n", label, format_price(tariff.price)));
        }
    }
    out
}

#[derive(Debug, Serialize)]
struct PriceRow<'a> {
    service_path: &'a str,
    service_title: &'a str,
    tariff_id: String,
    tariff_title: &'a str,
    duration: &'a str,
    price: f64,
    price_label: String,
}

pub fn write_price_csv<W: Write>(tree: &ServiceTree, writer: W) -> Result<()> {
    let rows = tree.services_with_tariffs();
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &rows {
        for tariff in &row.tariffs {
            csv_writer.serialize(PriceRow {
                service_path: &row.path,
                service_title: &row.title,
                tariff_id: tariff.id.to_string(),
                tariff_title: &tariff.title,
                duration: &tariff.duration,
                price: tariff.price,
                price_label: format_price(tariff.price),
            })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_hero(hero: Option<&Hero>, error: &str) -> String {
    match hero {
        Some(hero) => format!(
            "{}\n{}\nbackground: {}\navatar: {}\n",
            hero.title, hero.description, hero.background_image, hero.avatar
        ),
        None => format!("{}\n", error),
    }
}
