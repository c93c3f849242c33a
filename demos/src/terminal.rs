use stockboard::{BrandKey, PresentationSink, RowRecord, StatusLine};

/// Prints board updates to stdout as plain-text tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSink;

impl PresentationSink for TerminalSink {
    fn populate_times(&mut self, date: &str, times: &[String]) {
        if times.is_empty() {
            println!("times for {date}: Latest");
        } else {
            println!("times for {date}: Latest, {}", times.join(", "));
        }
    }

    fn show_status(&mut self, status: &StatusLine) {
        println!();
        println!(
            "== {} @ {} [{}]",
            status.date,
            status.time,
            if status.available { "available" } else { "unavailable" }
        );
    }

    fn render_section(&mut self, brand: &BrandKey, rows: &[RowRecord]) {
        if rows.is_empty() {
            return;
        }
        println!("-- {brand}");
        for row in rows {
            println!(
                "   {:<24} {:<12} {:<18} {:>10} {:>10}  {} ({})",
                row.model,
                row.ram_storage,
                row.color,
                row.price,
                row.online_price,
                row.stock,
                row.stock_class.as_str()
            );
        }
    }

    fn set_not_found(&mut self, not_found: bool) {
        if not_found {
            println!("   no data available for this date");
        }
    }
}
