mod product;
mod ticket_line;

pub use product::Product;
pub use ticket_line::TicketLine;
