//! Where a rendered receipt ends up.
//!
//! A surface that cannot be opened is not an error: printing just stops.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use bakery_core::{ReceiptHeader, render_print_document};
use tracing::{debug, warn};

pub trait PrintSurface {
    /// Open the surface for writing, or `None` when it is unavailable.
    fn open(&self) -> Option<Box<dyn Write>>;

    /// Turn receipt text into what this surface expects.
    fn render(
        &self,
        header: &ReceiptHeader,
        receipt: &str,
    ) -> String;
}

/// Plain receipt text on stdout.
pub struct StdoutSurface;

impl PrintSurface for StdoutSurface {
    fn open(&self) -> Option<Box<dyn Write>> {
        Some(Box::new(io::stdout()))
    }

    fn render(
        &self,
        _header: &ReceiptHeader,
        receipt: &str,
    ) -> String {
        receipt.to_string()
    }
}

/// Print-ready HTML page written to a file, for opening in a browser.
pub struct HtmlFileSurface {
    pub path: PathBuf,
}

impl PrintSurface for HtmlFileSurface {
    fn open(&self) -> Option<Box<dyn Write>> {
        match File::create(&self.path) {
            Ok(file) => Some(Box::new(file)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot open print surface");
                None
            }
        }
    }

    fn render(
        &self,
        header: &ReceiptHeader,
        receipt: &str,
    ) -> String {
        render_print_document(header, receipt)
    }
}

/// Send a receipt to `surface`. Returns whether anything was written.
pub fn print_receipt(
    surface: &dyn PrintSurface,
    header: &ReceiptHeader,
    receipt: &str,
) -> bool {
    let Some(mut out) = surface.open() else {
        return false;
    };

    let document = surface.render(header, receipt);
    match out.write_all(document.as_bytes()).and_then(|_| out.flush()) {
        Ok(()) => {
            debug!(bytes = document.len(), "receipt printed");
            true
        }
        Err(e) => {
            warn!(error = %e, "failed to write receipt");
            false
        }
    }
}
