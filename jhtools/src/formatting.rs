use jersey_hub_engine::catalog_types::Product;
use prettytable::{row, Table};

pub fn products_table(products: &[Product]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["ID", "Name", "Team", "Brand", "Tag", "Price", "Rating", "Created"]);
    for p in products {
        let created = p.created_at.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_else(|| "-".to_string());
        table.add_row(row![
            p.id,
            p.name,
            p.team,
            p.brand,
            p.tag,
            p.price.to_string(),
            p.rating.to_string(),
            created
        ]);
    }
    table
}
