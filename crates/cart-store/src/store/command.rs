//! Messages sent from handles to the store task.

use tokio::sync::oneshot;

use crate::cart::NewCartItem;
use crate::ids::ProductId;

/// A request for the store task.
#[derive(Debug)]
pub(crate) enum Command {
    Add(NewCartItem),
    Increment(ProductId),
    Decrement(ProductId),
    Clear,
    /// Acknowledged once every earlier command has finished, persistence
    /// included.
    Flush,
    Shutdown,
}

impl Command {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add_to_cart",
            Self::Increment(_) => "increment",
            Self::Decrement(_) => "decrement",
            Self::Clear => "clear",
            Self::Flush => "flush",
            Self::Shutdown => "shutdown",
        }
    }
}

/// A command paired with the channel its acknowledgement goes back on.
#[derive(Debug)]
pub(crate) struct Envelope {
    pub(crate) command: Command,
    pub(crate) ack: oneshot::Sender<()>,
}
