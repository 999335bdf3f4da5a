use std::io;

use clap::{Args, Subcommand};
use storefront::{
    cart::{CartItemId, CartViewModel},
    products::ProductId,
    views::CartView,
};
use storefront_app::context::AppContext;

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart.
    Show,

    /// Add a product.
    Add {
        /// Product id
        product_id: String,

        /// Units to add
        #[arg(long, short, default_value_t = 1)]
        quantity: u32,
    },

    /// Change a line's quantity.
    Update {
        /// Cart item id
        item_id: String,

        /// New quantity
        quantity: u32,
    },

    /// Remove a line.
    Remove {
        /// Cart item id
        item_id: String,
    },

    /// Remove every line.
    Clear,
}

pub(crate) async fn run(
    command: CartCommand,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let cart = match command.command {
        CartSubcommand::Show => ctx.carts.fetch_cart().await?,
        CartSubcommand::Add {
            product_id,
            quantity,
        } => {
            ctx.carts
                .add_to_cart(ProductId::new(product_id), quantity)
                .await?
        }
        CartSubcommand::Update { item_id, quantity } => {
            ctx.carts
                .update_quantity(CartItemId::new(item_id), quantity)
                .await?
        }
        CartSubcommand::Remove { item_id } => {
            ctx.carts
                .remove_from_cart(CartItemId::new(item_id))
                .await?
        }
        CartSubcommand::Clear => ctx.carts.clear_cart().await?,
    };

    render(&cart, out)
}

fn render(cart: &CartViewModel, out: &mut impl io::Write) -> Result<(), CliError> {
    CartView::new(cart)?.write_to(out)?;

    Ok(())
}
