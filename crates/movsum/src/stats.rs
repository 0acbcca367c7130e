use movsum_stats::Sketch;
use prettytable::{Table, row};

/// Latency sketches for one window instance.
///
/// Clones share the underlying sketches, so cloned window handles report
/// into the same profile.
#[derive(Debug, Default, Clone)]
pub(crate) struct Stats {
    pub(crate) add: Sketch,
    pub(crate) get: Sketch,
}

impl Stats {
    pub(crate) fn print(&self, name: &str) {
        let mut table = Table::new();
        table.add_row(row![
            "op", "count", "min", "p50", "p99", "p99.9", "p99.99", "max",
        ]);

        // helper fn to format percentile
        let percentile_fmt = |p: f64| -> String { format!("{:.2}ns", p) };

        // helper fn to add row to the table
        let mut add_row = |id: &str, sketch: &Sketch| {
            let percentiles = sketch.percentiles();
            table.add_row(row![
                id,
                percentiles.count,
                percentile_fmt(percentiles.min),
                percentile_fmt(percentiles.p50),
                percentile_fmt(percentiles.p99),
                percentile_fmt(percentiles.p99_9),
                percentile_fmt(percentiles.p99_99),
                percentile_fmt(percentiles.max),
            ]);
        };

        add_row("add", &self.add);
        add_row("get", &self.get);

        println!("===={} Profiler Dump====", name);
        table.printstd();
    }
}
