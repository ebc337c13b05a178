use std::path::PathBuf;

use clap::Args;
use greengrocer::{fixtures, pricing::format_money};
use greengrocer_app::{
    database::{self, Db},
    domain::products::{
        PgProductsService, ProductsService,
        data::{NewProduct, ProductQuery},
        records::{ProductRecord, ProductUuid},
    },
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// YAML catalog to load
    #[arg(long, default_value = "fixtures/catalog.yml")]
    file: PathBuf,

    /// Seed even when the catalog already has products
    #[arg(long)]
    force: bool,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let entries = fixtures::load_catalog(&args.file)
        .map_err(|error| format!("failed to load {}: {error}", args.file.display()))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProductsService::new(Db::new(pool));

    let existing = service
        .list_products(ProductQuery::default())
        .await
        .map_err(|error| format!("failed to count products: {error}"))?
        .total;

    if existing > 0 && !args.force {
        println!("catalog already has {existing} products; use --force to seed anyway");
        return Ok(());
    }

    let mut created = Vec::with_capacity(entries.len());

    for entry in entries {
        let product = service
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: entry.name,
                description: entry.description,
                price: entry.price,
                image: entry.image,
                category: entry.category,
                stock: entry.stock,
            })
            .await
            .map_err(|error| format!("failed to create product: {error}"))?;

        created.push(product);
    }

    println!("{}", summary_table(&created));
    println!("seeded {} products", created.len());

    Ok(())
}

fn summary_table(products: &[ProductRecord]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Product", "Category", "Price", "Stock"]);

    for product in products {
        builder.push_record([
            product.name.clone(),
            product.category.to_string(),
            format_money(product.price),
            product.stock.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..4), Alignment::right());

    table.to_string()
}
