use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use storefront_core::{
    CatalogProvider, CatalogService, Config, FakeStoreProvider, FilterAction, Product, SortBy,
    Store,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(version, about = "Browse the Fake Store product catalog from the terminal", long_about = None)]
struct Cli {
    /// Store API root, overrides the config file
    #[arg(long, global = true, env = "STOREFRONT_API_URL")]
    api_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List products, optionally searched, filtered and sorted
    List {
        /// Case-insensitive text to look for in product titles
        #[arg(short, long, default_value = "")]
        search: String,
        /// Exact category name (see `storefront categories`)
        #[arg(short, long, default_value = "")]
        category: String,
        /// none, price-asc or price-desc
        #[arg(long, default_value = "none", value_parser = parse_sort)]
        sort: SortBy,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one product
    Show {
        /// Product id
        id: u64,
        #[arg(long)]
        json: bool,
    },
    /// List the available categories
    Categories {
        #[arg(long)]
        json: bool,
    },
    /// Interactive browser (the default)
    Tui,
}

fn parse_sort(value: &str) -> Result<SortBy, String> {
    value.parse::<SortBy>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let provider = Arc::new(FakeStoreProvider::from_config(&config.api)?);
    let service = CatalogService::new(provider.clone());

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::List {
            search,
            category,
            sort,
            json,
        } => {
            tracing::info!("Listing products from {}", provider.base_url());
            let mut store = Store::new();
            service.load_products(&mut store).await;

            if let Some(error) = store.catalog().products_error() {
                anyhow::bail!("{}", error);
            }

            store.dispatch(FilterAction::SetSearchQuery(search));
            store.dispatch(FilterAction::SetSelectedCategory(category));
            store.dispatch(FilterAction::SetSortBy(sort));

            let products = store.visible_products();
            if json {
                println!("{}", serde_json::to_string_pretty(products)?);
            } else if products.is_empty() {
                println!("No products found.");
            } else {
                print_table(products);
            }
        }
        Commands::Show { id, json } => {
            let mut store = Store::new();
            service.load_product(&mut store, id).await;

            let catalog = store.catalog();
            let product = match (catalog.selected_product(), catalog.product_error()) {
                (Some(product), _) => product,
                (None, error) => anyhow::bail!("{}", error.unwrap_or("Product not found")),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(product)?);
            } else {
                print_product(product);
            }
        }
        Commands::Categories { json } => {
            let categories = provider.fetch_categories().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for category in categories {
                    println!("{}", category);
                }
            }
        }
        Commands::Tui => {
            let app = storefront_tui::App::new();
            storefront_tui::run_tui(app, service, config.ui.debounce()).await?;
        }
    }

    Ok(())
}

fn print_table(products: &[Product]) {
    println!("{:>4}  {:>9}  {:<18}  TITLE", "ID", "PRICE", "CATEGORY");
    for product in products {
        println!(
            "{:>4}  {:>9}  {:<18}  {}",
            product.id,
            format!("${:.2}", product.price),
            product.category,
            product.title
        );
    }
    println!("\n{} product(s)", products.len());
}

fn print_product(product: &Product) {
    println!("{}", product.title);
    println!("  Price:    ${:.2}", product.price);
    println!("  Category: {}", product.category);
    println!("  Rating:   {}", product.rating_label());
    println!("  Image:    {}", product.image);
    println!();
    println!("{}", product.description);
}
