//! Fixed-width receipt rendering.
//!
//! Everything here is pure: the caller supplies the header, the issue
//! date/time strings and the ledger projection.

use std::fmt;

use rust_decimal::Decimal;

use crate::models::TicketLine;
use crate::money::format_amount;

/// Width of the rule lines, in characters.
pub const RECEIPT_WIDTH: usize = 39;
/// Product names longer than this are truncated.
pub const NAME_COLUMN_WIDTH: usize = 15;

const RULE_CHAR: char = '═';

/// Store identification printed at the top of every receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptHeader {
    pub store_name: String,
    pub address: String,
    pub phone: String,
}

impl Default for ReceiptHeader {
    fn default() -> Self {
        Self {
            store_name: "PANADERÍA EL SÉSAMO S.A".to_string(),
            address: "C/Del trigo Nº24, 28916 Madrid".to_string(),
            phone: "91 694 55 66".to_string(),
        }
    }
}

/// Locale-formatted issue date and time, e.g. `19/10/2026` and `09:30:00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedAt {
    pub date: String,
    pub time: String,
}

impl IssuedAt {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }
}

/// Indent of the store name in the header block.
pub const STORE_NAME_INDENT: usize = 6;
/// Indent of the "TICKET DE COMPRA" title.
pub const TITLE_INDENT: usize = 15;

fn rule() -> String {
    RULE_CHAR.to_string().repeat(RECEIPT_WIDTH)
}

fn truncate_name(name: &str) -> String {
    name.chars().take(NAME_COLUMN_WIDTH).collect()
}

/// Render one ticket line:
/// `{glyph} {name:<15} {qty:>3} x {price:>6}€ = {total:>8}€`.
pub fn format_line(line: &TicketLine) -> String {
    format!(
        "{} {:<width$} {:>3} x {:>6}€ = {:>8}€",
        line.glyph,
        truncate_name(&line.name),
        line.quantity,
        format_amount(line.unit_price),
        format_amount(line.total),
        width = NAME_COLUMN_WIDTH,
    )
}

/// A receipt ready to be displayed.
///
/// Subtotal and total are the same figure; there is no tax or discount
/// model.
pub struct Receipt<'a> {
    pub header: &'a ReceiptHeader,
    pub issued_at: &'a IssuedAt,
    pub lines: &'a [TicketLine],
    pub grand_total: Decimal,
}

impl fmt::Display for Receipt<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let rule = rule();
        let total = format_amount(self.grand_total);

        writeln!(f, "{rule}")?;
        writeln!(f, "{:indent$}{}", "", self.header.store_name, indent = STORE_NAME_INDENT)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.header.address)?;
        writeln!(f, "Teléfono: {}", self.header.phone)?;
        writeln!(f)?;
        writeln!(f, "Fecha: {}", self.issued_at.date)?;
        writeln!(f, "Hora: {}", self.issued_at.time)?;
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:indent$}TICKET DE COMPRA", "", indent = TITLE_INDENT)?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;

        for line in self.lines {
            writeln!(f, "{}", format_line(line))?;
        }

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "SUBTOTAL: {total:>26}€")?;
        writeln!(f, "TOTAL: {total:>29}€")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "¡Gracias por su compra!")?;
        writeln!(f, "Vuelva pronto a visitarnos")?;
        writeln!(f)?;
        writeln!(f, "{rule}")
    }
}

/// Render the full receipt text.
pub fn format_receipt(
    header: &ReceiptHeader,
    issued_at: &IssuedAt,
    lines: &[TicketLine],
    grand_total: Decimal,
) -> String {
    Receipt {
        header,
        issued_at,
        lines,
        grand_total,
    }
    .to_string()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap receipt text in a print-ready HTML page that opens the print
/// dialog on load.
pub fn render_print_document(
    header: &ReceiptHeader,
    receipt: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Ticket - {title}</title>
    <style>
        body {{ font-family: 'Courier New', monospace; padding: 20px; margin: 0; background: white; }}
        .ticket {{ max-width: 400px; margin: 0 auto; border: 2px solid #333; padding: 20px; }}
        pre {{ font-size: 12px; line-height: 1.4; margin: 0; white-space: pre-wrap; }}
        @media print {{
            body {{ padding: 0; }}
            .ticket {{ border: none; }}
        }}
    </style>
</head>
<body>
    <div class="ticket">
        <pre>{body}</pre>
    </div>
    <script>
        window.onload = function() {{ window.print(); }};
    </script>
</body>
</html>
"#,
        title = escape_html(&header.store_name),
        body = escape_html(receipt),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::Product;

    fn issued() -> IssuedAt {
        IssuedAt::new("19/10/2026", "09:30:00")
    }

    fn sample_lines() -> Vec<TicketLine> {
        vec![
            TicketLine::for_product(&Product::new("Chapata", dec!(0.65), "🥖"), 2),
            TicketLine::for_product(&Product::new("Croissant", dec!(1.20), "🥐"), 1),
        ]
    }

    #[test]
    fn format_line_aligns_columns() {
        let line = &sample_lines()[0];

        assert_eq!(
            format_line(line),
            "🥖 Chapata           2 x   0.65€ =     1.30€"
        );
    }

    #[test]
    fn format_line_truncates_long_names() {
        let product = Product::new("Tarta de Santiago Grande", dec!(12.5), "🎂");
        let line = TicketLine::for_product(&product, 10);

        assert_eq!(
            format_line(&line),
            "🎂 Tarta de Santia  10 x  12.50€ =   125.00€"
        );
    }

    #[test]
    fn receipt_lists_lines_in_order() {
        let text = format_receipt(&ReceiptHeader::default(), &issued(), &sample_lines(), dec!(2.50));

        let chapata = text.find("Chapata").expect("Chapata line missing");
        let croissant = text.find("Croissant").expect("Croissant line missing");
        assert!(chapata < croissant);
    }

    #[test]
    fn receipt_footer_repeats_grand_total() {
        let text = format_receipt(&ReceiptHeader::default(), &issued(), &sample_lines(), dec!(2.5));

        assert!(text.contains(&format!("SUBTOTAL: {:>26}€\n", "2.50")));
        assert!(text.contains(&format!("TOTAL: {:>29}€\n", "2.50")));
    }

    #[test]
    fn receipt_includes_header_and_timestamp() {
        let text = format_receipt(&ReceiptHeader::default(), &issued(), &[], dec!(0));

        assert!(text.contains("PANADERÍA EL SÉSAMO S.A"));
        assert!(text.contains("Teléfono: 91 694 55 66"));
        assert!(text.contains("Fecha: 19/10/2026\n"));
        assert!(text.contains("Hora: 09:30:00\n"));
        assert!(text.starts_with(&"═".repeat(RECEIPT_WIDTH)));
    }

    #[test]
    fn header_lines_use_storefront_indents() {
        let text = format_receipt(&ReceiptHeader::default(), &issued(), &[], dec!(0));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "      PANADERÍA EL SÉSAMO S.A");
        assert_eq!(lines[10], "               TICKET DE COMPRA");
    }

    #[test]
    fn print_document_escapes_receipt_text() {
        let html = render_print_document(&ReceiptHeader::default(), "<b>Pan & Co</b>");

        assert!(html.contains("<pre>&lt;b&gt;Pan &amp; Co&lt;/b&gt;</pre>"));
        assert!(html.contains("window.print()"));
        assert!(html.contains("<title>Ticket - PANADERÍA EL SÉSAMO S.A</title>"));
    }
}
