//! Chart Layout Example - plot area and axis containers
//!
//! This example lays out the skeleton of a price chart:
//! - A plot area that takes all remaining space
//! - A time axis strip below it and a price axis strip to its right
//! - A resize pass that only dirties what moved
//!
//! Run with: cargo run --example chart_layout
//! Trace the pass with: RUST_LOG=svg_flex=trace cargo run --example chart_layout

use svg_flex::{layout, layout_with_size, svg, Document, NodeId, Selection};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CHART: &str = r#"<svg width="640" height="360" style="padding: 8px">
  <g class="chart" layout-css="flexDirection: row; flex: 1">
    <g class="plot-container" layout-css="flex: 1">
      <rect class="plot-area" layout-css="flex: 1" fill="none" stroke="black"/>
      <g class="axis bottom" layout-css="height: 30"/>
    </g>
    <g class="axis right" layout-css="width: 50"/>
  </g>
</svg>"#;

fn find_class(doc: &Document, class: &str) -> Option<NodeId> {
    doc.elements()
        .into_iter()
        .find(|&n| doc.attribute(n, "class") == Some(class))
}

fn print_geometry(doc: &Document) {
    for class in ["chart", "plot-container", "plot-area", "axis bottom", "axis right"] {
        let Some(node) = find_class(doc, class) else {
            continue;
        };
        println!(
            "  {:<16} {:>4} x {:<4} {}",
            class,
            doc.attribute(node, "layout-width").unwrap_or("-"),
            doc.attribute(node, "layout-height").unwrap_or("-"),
            doc.attribute(node, "transform").unwrap_or(""),
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("svg_flex=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== svg-flex Chart Layout Example ===\n");

    let mut doc = svg::parse(CHART)?;
    let root = doc.root().ok_or("chart markup has no root element")?;
    let chart = Selection::single(root);

    // Size from the container's own width/height minus padding
    let report = layout(&mut doc, &chart);
    for error in report.errors() {
        eprintln!("layout failed: {error}");
    }
    println!("Measured ({:?}):", report.roots[0].size);
    print_geometry(&doc);
    doc.take_dirty();

    // Resize: only nodes whose geometry changed are marked dirty
    layout_with_size(&mut doc, &chart, 800.0, 360.0);
    println!("\nResized to 800 x 360:");
    print_geometry(&doc);
    println!("  dirty nodes: {}", doc.take_dirty().len());

    println!("\n{}", svg::to_string(&doc));
    Ok(())
}
