use clap::{Args, Parser, Subcommand};

mod formatting;
mod login;
mod products;
mod watch;

use crate::{
    login::login,
    products::{add_product, delete_product, list_products},
    watch::watch_catalog,
};

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Operator tools for the JerseyHub catalog")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(subcommand)]
    /// Retrieve or modify catalog products
    Products(ProductsCommand),
    /// Follow the live catalog, printing the derived view on every snapshot. Ctrl-C to stop.
    Watch(WatchParams),
    /// Sign in against the auth provider and report whether the account has admin rights
    Login,
}

#[derive(Debug, Args)]
pub struct WatchParams {
    /// Case-insensitive search over name and team
    #[arg(short = 's', long = "search", default_value = "")]
    pub search: String,
    /// Category filter: all, new, or sale
    #[arg(short = 'f', long = "filter", default_value = "all")]
    pub filter: String,
    /// Sort key: popularity, price-asc, price-desc, or rating
    #[arg(short = 'o', long = "sort", default_value = "popularity")]
    pub sort: String,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// Fetch and display the complete product collection
    List,
    /// Upload an image and create a new product document
    Add(AddProductParams),
    /// Delete a product: its image first, then its document
    Delete {
        #[arg(required = true, index = 1)]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct AddProductParams {
    #[arg(short = 'n', long = "name")]
    pub name: String,
    #[arg(short = 't', long = "team")]
    pub team: String,
    #[arg(short = 'b', long = "brand", default_value = "")]
    pub brand: String,
    /// Category tag, e.g. "New" or "Sale"
    #[arg(short = 'g', long = "tag", default_value = "")]
    pub tag: String,
    /// Accessibility description for the image
    #[arg(short = 'a', long = "alt-text")]
    pub alt_text: String,
    /// Price in rupees
    #[arg(short = 'p', long = "price", default_value = "0")]
    pub price: f64,
    /// Star rating, 0 to 5
    #[arg(short = 'r', long = "rating", default_value = "0")]
    pub rating: f64,
    /// Path to the jersey image to upload
    #[arg(short = 'i', long = "image")]
    pub image: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    let result = match cli.command {
        Command::Products(ProductsCommand::List) => list_products().await,
        Command::Products(ProductsCommand::Add(params)) => add_product(params).await,
        Command::Products(ProductsCommand::Delete { id, yes }) => delete_product(id, yes).await,
        Command::Watch(params) => watch_catalog(params).await,
        Command::Login => login().await,
    };
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
